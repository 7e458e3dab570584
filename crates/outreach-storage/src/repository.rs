//! Repository layer for data access

pub mod campaigns;
pub mod contacts;
pub mod email_accounts;
pub mod email_lists;
pub mod uploads;

pub use campaigns::CampaignRepository;
pub use contacts::ContactRepository;
pub use email_accounts::EmailAccountRepository;
pub use email_lists::EmailListRepository;
pub use uploads::UploadRepository;
