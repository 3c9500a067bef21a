//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                        ┌──────────────┐
//!                        │     CLI      │
//!                        └──────┬───────┘
//!                               ▼ inbound::operator
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │    Domain + Port        │
//!                    └────────────┬────────────┘
//!          ┌──────────────────────┼──────────────────────┐
//!          ▼                      ▼                      ▼
//!   ┌─────────────┐       ┌──────────────┐       ┌──────────────┐
//!   │  Readiness  │       │   Catalog    │       │    Build     │
//!   │  (postgres) │       │  (postgres)  │       │  (process)   │
//!   └─────────────┘       └──────────────┘       └──────────────┘
//! ```

pub mod inbound;
pub mod outbound;
