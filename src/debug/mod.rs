// src/debug/mod.rs

// Debug-Ausgaben, unabhängig von einer Karten-UI
pub mod visualization;
