//! Controller layer: routing UI interactions into the list controller.

pub mod orchestration;
