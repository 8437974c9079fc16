pub mod history;
pub mod product;
pub mod user;

pub use history::{
    HistoryEntry, HistoryPage, HistoryQuery, Pagination, SearchHistory, SearchParams, StoredResult,
};
pub use product::{Platform, ProductMatch};
pub use user::{PublicUser, RecentUser, User};
