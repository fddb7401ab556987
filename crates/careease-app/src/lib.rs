// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod forms;
pub mod ids;
pub mod model;
pub mod payment;
pub mod remote;
pub mod schedule;
pub mod state;

pub use forms::*;
pub use ids::*;
pub use model::*;
pub use payment::*;
pub use remote::*;
pub use schedule::*;
pub use state::*;
