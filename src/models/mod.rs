pub mod event;
pub mod job_listing;
pub mod outbound;
pub mod survey;
pub mod telegram;
