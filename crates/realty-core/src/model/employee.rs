// ── Employee domain types ──

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Job title of an employee.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeRole {
    SalesJunior,
    SalesSenior,
    Supervisor,
    Manager,
    Accountant,
    It,
}

impl EmployeeRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::SalesJunior => "Sales Junior",
            Self::SalesSenior => "Sales Senior",
            Self::Supervisor => "Supervisor",
            Self::Manager => "Manager",
            Self::Accountant => "Accountant",
            Self::It => "IT",
        }
    }
}

/// Employment status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Inactive,
}

impl EmployeeStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::OnLeave, Self::Inactive];

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Inactive => "Inactive",
        }
    }
}

/// A company employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: EmployeeRole,
    pub email: String,
    pub phone: String,
    pub status: EmployeeStatus,
    pub deals_closed: u32,
    pub hire_date: NaiveDate,
}
