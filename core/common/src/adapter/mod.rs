//! アダプター（外界の I/O を trait で抽象化）
//!
//! usecase は ports::outbound の trait 経由でのみ HTTP・ファイル・環境変数に触れる。
//! 実装は標準実装（Std* / Reqwest*）やテスト用の Stub / Noop を注入する。

pub mod file_json_log;
pub mod reqwest_json_source;
pub mod std_env_resolver;
pub mod std_fs;
pub mod stderr_log;
pub mod stub_json_source;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use reqwest_json_source::ReqwestJsonSource;
pub use std_env_resolver::StdEnvResolver;
pub use std_fs::StdFileSystem;
pub use stderr_log::{StderrLog, TeeLog};
pub use stub_json_source::StubJsonSource;
