use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::Collection;
use crate::models::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub name: String,
    pub whatsapp: String,
    pub service_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// A fresh booking request. Always starts out pending.
    pub fn new(name: String, whatsapp: String, service_type: String, message: Option<String>) -> Self {
        Self {
            name,
            whatsapp,
            service_type,
            message: message.unwrap_or_default(),
            status: AppointmentStatus::Pending,
            updated_at: None,
        }
    }
}

impl Record for Appointment {
    const COLLECTION: Collection = Collection::Appointments;
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "completed" => Some(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }
}
