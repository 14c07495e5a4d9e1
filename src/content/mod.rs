//! Fixed content collections.
//!
//! Posts live in TOML registries inside the content directory, one file per
//! collection:
//!
//! | File               | Collection  | Tables        |
//! |--------------------|-------------|---------------|
//! | `articles.toml`    | Articles    | `[[posts]]`   |
//! | `til.toml`         | TILs        | `[[posts]]`   |
//! | `reflections.toml` | Reflections | `[[posts]]`   |
//! | `misc.toml`        | Misc notes  | `[[notes]]`   |
//!
//! ```toml
//! [[posts]]
//! id = "3"
//! title = "Go의 netpollor 소스코드 뜯어보기"
//! subtitle = "Go가 tail latency에서 압도적으로 좋은 이유"
//! date = "2025-11-18T23:48:00"
//! tags = ["Go", "Goroutine", "netpollor"]
//! slug = "go-netpollor"
//! content_path = "/content/til/go-netpoller.md"
//! ```
//!
//! Records carry no kind field. The kind comes from the file a record was read
//! from and is attached during ingestion.

mod date;
mod error;
mod registry;
mod types;

pub use date::PostDate;
pub use registry::ContentRegistry;
pub use types::{AnnotatedPost, MiscNote, MiscRecord, Post, PostKind, PostRecord, TagCount};

#[cfg(test)]
pub(crate) use registry::tests::record;
