pub mod contract;
pub mod contract_cit_committee;
pub mod contract_status;
pub mod department;
pub mod division;
pub mod employee;
pub mod loa_status;
pub mod procurement_type;
pub mod region;
pub mod requisition;
pub mod section;
pub mod tender;
pub mod tender_evaluation_committee;
pub mod tender_opening_committee;
pub mod user_account;
