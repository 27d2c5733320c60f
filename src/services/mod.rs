pub mod contracts;
pub mod dashboard;
pub mod employees;
pub mod imports;
pub mod org;
pub mod requisitions;
pub mod tenders;
pub mod users;
