use crate::model::attendance::AttendanceRecord;

/// Records whose name, department or employee number contains `query`,
/// ignoring case. Input order is kept; an empty query keeps everything.
pub fn filter(records: &[AttendanceRecord], query: &str) -> Vec<AttendanceRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.department.to_lowercase().contains(&needle)
                || r.employee_number.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, name: &str, number: &str, department: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: id.to_string(),
            name: name.to_string(),
            employee_number: number.to_string(),
            department: department.to_string(),
            date: "2024-05-01".to_string(),
            arrival_time: "08:00".to_string(),
            timestamp: 0,
        }
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            rec("3", "Maria Santos", "2024-003", "QA"),
            rec("2", "Juan Dela Cruz", "2024-001", "Engineering"),
            rec("1", "Ana Reyes", "2023-117", "Production Sec 1A"),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let records = sample();
        assert_eq!(filter(&records, ""), records);
    }

    #[test]
    fn matches_department_case_insensitively() {
        let hits = filter(&sample(), "ENG");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].department, "Engineering");
    }

    #[test]
    fn matches_any_of_the_three_fields_in_order() {
        let records = sample();
        // "a" appears in every name
        let ids: Vec<_> = filter(&records, "a").into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["3", "2", "1"]);

        let by_number: Vec<_> = filter(&records, "2024-00").into_iter().map(|r| r.id).collect();
        assert_eq!(by_number, ["3", "2"]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(filter(&sample(), "payroll").is_empty());
    }

    #[test]
    fn date_and_time_are_not_searched() {
        assert!(filter(&sample(), "08:00").is_empty());
    }
}
