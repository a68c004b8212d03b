pub mod feedback;
pub mod job_mode;
