// Domain layer - Core pipeline types

pub mod model;
