/// Departments offered by the check-in form.
pub const DEPARTMENTS: [&str; 11] = [
    "HR",
    "Engineering",
    "logistics",
    "Admin",
    "Production Sec 1A",
    "Production Sec 1B",
    "Production Sec 1C",
    "Production Sec 2",
    "Production Sec 3",
    "SHE",
    "QA",
];
