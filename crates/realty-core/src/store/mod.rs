// ── Reactive data storage ──

mod collection;
mod directory;

pub use directory::Directory;
