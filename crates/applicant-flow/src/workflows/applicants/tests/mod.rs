mod common;

mod enrichment;
mod sync;
