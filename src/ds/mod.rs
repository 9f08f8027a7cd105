pub mod top_k_heap;

pub use top_k_heap::{Admission, TopKHeap};
