// Adapters layer: concrete implementations for external systems (http transport, markup extraction).

pub mod html;
pub mod http;
pub mod xml;
