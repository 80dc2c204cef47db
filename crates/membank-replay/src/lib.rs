//! Request-script playback against banked memories.
//!
//! Reads a CSV list of timed read and write requests and issues them, in
//! order, against a memory through a blocking bus port. Every read
//! response is checked against the data the script expects.
//!
//! # Architecture
//!
//! - [`ScriptReader`] / [`ScriptWriter`] decode and encode the script text
//! - [`ScriptPlayer`] issues commands and checks read data
//! - [`BusPort`] is the master's view of the bus; [`MemoryPort`] serves it
//!   directly from a memory, [`ChannelPort`] forwards it to a memory
//!   slave thread started by [`spawn_memory_slave`]
//! - [`AddressMap`] turns byte addresses into `(local index, bank)` pairs
//!
//! # Format
//!
//! ```text
//! # delay,kind,address,data
//! 0,W,0x40,deadbeef
//! 4,R,0x40,deadbeef
//! ```
//!
//! `delay` counts idle cycles before the request; it is reported, never
//! slept on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod addr;
pub mod channel;
pub mod codec;
pub mod error;
pub mod player;
pub mod port;
pub mod reader;
pub mod types;
pub mod writer;

pub use addr::AddressMap;
pub use channel::{spawn_memory_slave, BusRequest, BusResponse, ChannelPort, SlaveHandle};
pub use error::ReplayError;
pub use player::ScriptPlayer;
pub use port::{BusPort, MemoryPort};
pub use reader::{load_script, CommandIter, ScriptReader};
pub use types::{Command, PlaybackReport, Request};
pub use writer::ScriptWriter;
