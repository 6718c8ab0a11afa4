pub mod leftist_heap;
pub mod priority_queue;

pub use leftist_heap::{HeapRef, LeftistNode};
pub use priority_queue::BinaryHeapWrapper;
