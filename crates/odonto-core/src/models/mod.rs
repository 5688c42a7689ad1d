pub mod appointment;
pub mod cash;
pub mod clinical_event;
pub mod odontogram;
pub mod patient;
pub mod tooth;
pub mod treatment_plan;
