use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// One generated upgrade suggestion, carrying the cost/savings estimates and
/// a lifecycle status. Belongs to exactly one audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rule: String,
    pub category: Category,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Estimated annual savings in dollars.
    pub estimated_savings: f64,
    /// Estimated implementation cost in dollars.
    pub estimated_cost: f64,
    /// Years to recoup the cost; None whenever savings are zero or negative.
    pub payback_years: Option<f64>,
    pub status: Status,
    pub actual_savings: Option<f64>,
    pub implementation_date: Option<NaiveDate>,
}

impl Recommendation {
    pub fn new(
        rule: &str,
        category: Category,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
        estimated_savings: f64,
        estimated_cost: f64,
    ) -> Self {
        Recommendation {
            rule: rule.to_string(),
            category,
            priority,
            title: title.into(),
            description: description.into(),
            estimated_savings,
            estimated_cost,
            payback_years: payback_period(estimated_cost, estimated_savings),
            status: Status::Pending,
            actual_savings: None,
            implementation_date: None,
        }
    }

    /// Pending -> InProgress.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        match self.status {
            Status::Pending => {
                self.status = Status::InProgress;
                Ok(())
            }
            from => Err(TransitionError {
                from,
                to: Status::InProgress,
            }),
        }
    }

    /// InProgress -> Implemented. Actual savings and the implementation date
    /// are only ever set here; reverting out of Implemented is not modeled.
    pub fn implement(
        &mut self,
        actual_savings: Option<f64>,
        date: NaiveDate,
    ) -> Result<(), TransitionError> {
        match self.status {
            Status::InProgress => {
                self.status = Status::Implemented;
                self.actual_savings = actual_savings;
                self.implementation_date = Some(date);
                Ok(())
            }
            from => Err(TransitionError {
                from,
                to: Status::Implemented,
            }),
        }
    }
}

/// cost / savings in years, undefined for non-positive savings.
pub fn payback_period(cost: f64, savings: f64) -> Option<f64> {
    if savings > 0.0 {
        Some(cost / savings)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Insulation,
    Windows,
    Hvac,
    Lighting,
    Humidity,
    Renewable,
    Appliances,
    SmartHome,
}

impl Category {
    /// Key used for product-catalog category matching.
    pub fn product_key(&self) -> &'static str {
        match self {
            Category::Insulation => "insulation",
            Category::Windows => "windows",
            Category::Hvac => "hvac",
            Category::Lighting => "lighting",
            Category::Humidity => "humidity",
            Category::Renewable => "renewable",
            Category::Appliances => "appliances",
            Category::SmartHome => "smart-home",
        }
    }

    /// Domain severity heuristic, used unless a rule computed its own
    /// priority from the data.
    pub fn default_priority(&self) -> Priority {
        match self {
            Category::Insulation | Category::Hvac | Category::Renewable => Priority::High,
            Category::Windows | Category::Lighting | Category::Appliances => Priority::Medium,
            Category::Humidity | Category::SmartHome => Priority::Low,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Insulation => write!(f, "Insulation"),
            Category::Windows => write!(f, "Windows"),
            Category::Hvac => write!(f, "HVAC"),
            Category::Lighting => write!(f, "Lighting"),
            Category::Humidity => write!(f, "Humidity"),
            Category::Renewable => write!(f, "Renewable"),
            Category::Appliances => write!(f, "Appliances"),
            Category::SmartHome => write!(f, "Smart Home"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort key: high priorities first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Implemented,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "pending"),
            Status::InProgress => write!(f, "in_progress"),
            Status::Implemented => write!(f, "implemented"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: Status,
    pub to: Status,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status transition {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for TransitionError {}
