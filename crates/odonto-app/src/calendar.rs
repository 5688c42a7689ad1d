//! Month calendar view over the appointments endpoint.

use std::collections::BTreeMap;

use tracing::warn;

use odonto_client::CashService;
use odonto_core::calendar::{self, DaySummary};
use odonto_core::models::appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest};

use crate::error::AppError;

/// One month of appointments plus the selected day.
#[derive(Debug)]
pub struct MonthView {
    pub year: i16,
    pub month: i8,
    /// `YYYY-MM-DD`, always within the loaded month after a load.
    pub selected_day: String,
    pub items: Vec<Appointment>,
}

impl MonthView {
    pub fn new(year: i16, month: i8) -> Self {
        Self {
            year,
            month,
            selected_day: format!("{year:04}-{month:02}-01"),
            items: Vec::new(),
        }
    }

    /// The current month on the local wall clock, with today selected.
    pub fn current() -> Self {
        let today = jiff::Zoned::now().date();
        let mut view = Self::new(today.year(), today.month());
        view.selected_day = format!(
            "{:04}-{:02}-{:02}",
            today.year(),
            today.month(),
            today.day()
        );
        view
    }

    fn month_prefix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Fetch the month's appointments, sorted by start time. A selected
    /// day outside this month snaps to the 1st.
    pub async fn load(&mut self, svc: &impl CashService) -> Result<(), AppError> {
        let (from, to) = calendar::month_range(self.year, self.month);
        let mut items = svc.appointments(&from, &to).await?;
        items.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        self.items = items;

        if !self.selected_day.starts_with(&self.month_prefix()) {
            self.selected_day = format!("{}-01", self.month_prefix());
        }
        Ok(())
    }

    pub fn prev_month(&mut self) {
        if self.month == 1 {
            self.year -= 1;
            self.month = 12;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.year += 1;
            self.month = 1;
        } else {
            self.month += 1;
        }
    }

    pub fn day_summaries(&self) -> BTreeMap<String, DaySummary> {
        calendar::summarize_by_day(&self.items)
    }

    pub fn day_items(&self, day: &str) -> Vec<&Appointment> {
        self.items
            .iter()
            .filter(|a| calendar::day_key(&a.start_time) == day)
            .collect()
    }

    pub fn selected_items(&self) -> Vec<&Appointment> {
        self.day_items(&self.selected_day)
    }

    /// Book an appointment and reload the month so it shows up in place.
    pub async fn book(
        &mut self,
        svc: &impl CashService,
        req: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppError> {
        let created = svc.create_appointment(req).await?;
        self.load(svc).await?;
        Ok(created)
    }

    /// Change an appointment's status and reload the month. COMPLETED
    /// and CANCELLED are terminal from the client: the change is
    /// refused locally, without a request, and `false` is returned.
    pub async fn set_status(
        &mut self,
        svc: &impl CashService,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<bool, AppError> {
        let Some(current) = self.items.iter().find(|a| a.id == id) else {
            return Ok(false);
        };
        if current.status.is_terminal() {
            warn!(id, current = ?current.status, "status change on terminal appointment refused");
            return Ok(false);
        }
        svc.update_appointment_status(id, status).await?;
        self.load(svc).await?;
        Ok(true)
    }
}
