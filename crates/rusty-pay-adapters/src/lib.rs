pub mod clock;
pub mod config;
pub mod eip1193;
pub mod price;
pub mod session_store;

pub use clock::SystemClockAdapter;
pub use config::{PaymentAdapterConfig, RuntimeProfile};
pub use eip1193::Eip1193Adapter;
pub use price::StaticPriceAdapter;
#[cfg(not(target_arch = "wasm32"))]
pub use session_store::FileSessionStore;
#[cfg(target_arch = "wasm32")]
pub use session_store::LocalStorageSessionStore;
pub use session_store::{MemorySessionStore, SessionStoreAdapter, CONNECTED_FLAG_KEY};
