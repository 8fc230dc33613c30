//! Lumière photography portfolio - native host
//!
//! 共通ライブラリ（lumiere-common）の状態管理をtokio上で動かす。
//! 保存先はファイル、AI通信はreqwest。

pub mod config;
pub mod error;
pub mod media;
pub mod session;
pub mod store;
pub mod transport;

pub use config::Config;
pub use error::{LumiereError, Result};
pub use session::Session;
pub use store::FileStore;
pub use transport::ReqwestTransport;
