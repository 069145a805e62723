pub mod collections;
pub mod error;
pub mod filter;
pub mod memory;
pub mod state;
pub mod store;
pub mod supabase;

pub use error::StoreError;
pub use filter::Filter;
pub use memory::InMemoryStore;
pub use state::AppState;
pub use store::RecordStore;
pub use supabase::SupabaseClient;
