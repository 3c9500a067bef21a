//! cwm-gateway - Container bootstrap for the CWM API Gateway MCP server.
//!
//! The gateway server needs two PostgreSQL databases: `cached_queries` for
//! saved queries and `connectwise_api` for the endpoint catalog built from
//! the ConnectWise `manage.json` schema. This crate gets a container from
//! "database is starting" to "server is running":
//!
//! 1. poll PostgreSQL at a fixed interval until it accepts connections,
//! 2. optionally create the databases,
//! 3. run `build_database.py` if the schema file exists, continuing on failure,
//! 4. exec the server command.
//!
//! # Architecture
//!
//! Hexagonal, like the rest of our services:
//!
//! - [`domain`] - Startup outcomes, database definitions, the package descriptor
//! - [`port`] - Traits for probing, provisioning and running the build
//! - [`adapter`] - PostgreSQL, child process and HTTP implementations, plus the CLI
//! - [`application`] - The startup sequence and its steps
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use cwm_gateway::infrastructure::bootstrap::{build_bootstrap, build_plan, StartupOptions};
//! use cwm_gateway::infrastructure::config::settings::Config;
//!
//! # async fn run() -> cwm_gateway::error::Result<()> {
//! let config = Config::load(None)?;
//! let plan = build_plan(&config, &StartupOptions::default());
//! let report = build_bootstrap(&config).run(&plan).await?;
//! println!("build: {}", report.build);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
