mod block_content;

pub use block_content::{BlockContent, BlockContentProps, Components};
