pub mod auth;
pub mod donation;
pub mod notification;
pub mod scan;

pub use auth::{Identity, RegisteredAccount, RegistrationRequest, Role, TokenPair, TokenRequest, UnknownRole};
pub use donation::{Donation, DonationRequest, DonationStatus, NewDonation, NewDonationRequest, RequestStatus};
pub use notification::{Notification, ReadFlagUpdate};
pub use scan::{ScanImage, ScanResult};
