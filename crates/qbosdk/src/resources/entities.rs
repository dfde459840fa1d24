//! Entity markers.

/// An accounting entity exposed through a [`Resource`](super::Resource) client.
pub trait Entity: Send + Sync + 'static {
    /// Entity name as used in queries and response envelopes.
    const NAME: &'static str;
    /// Path segment of the read-by-id endpoint.
    const PATH: &'static str;
    /// Plural label, used in logs and errors.
    const LABEL: &'static str;
}

/// Chart of accounts entries.
#[derive(Debug, Clone, Copy)]
pub enum Account {}

impl Entity for Account {
    const NAME: &'static str = "Account";
    const PATH: &'static str = "account";
    const LABEL: &'static str = "accounts";
}

/// Departments (locations).
#[derive(Debug, Clone, Copy)]
pub enum Department {}

impl Entity for Department {
    const NAME: &'static str = "Department";
    const PATH: &'static str = "department";
    const LABEL: &'static str = "departments";
}

/// Classes used to categorise transactions.
#[derive(Debug, Clone, Copy)]
pub enum Class {}

impl Entity for Class {
    const NAME: &'static str = "Class";
    const PATH: &'static str = "class";
    const LABEL: &'static str = "classes";
}

/// Employees.
#[derive(Debug, Clone, Copy)]
pub enum Employee {}

impl Entity for Employee {
    const NAME: &'static str = "Employee";
    const PATH: &'static str = "employee";
    const LABEL: &'static str = "employees";
}
