pub mod booking;
pub mod refund;
