//! Channel transport between the player and a memory slave thread.
//!
//! The memory moves onto its own thread and serves [`BusRequest`]s from a
//! bounded(1) crossbeam channel, answering on a second bounded(1)
//! channel. With one slot each way there is at most one transaction in
//! flight, matching a blocking push/pop bus.
//!
//! ```text
//!  ChannelPort                       slave thread
//!  ───────────                       ────────────
//!  write/read ──[req: bounded(1)]──▶ MemoryPort ─▶ BankedMemory<T>
//!             ◀─[resp: bounded(1)]──
//! ```
//!
//! The slave exits when the port is dropped; [`SlaveHandle::join`] then
//! hands the memory back for inspection.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, trace};
use membank_array::BankedMemory;
use membank_core::Marshal;

use crate::addr::AddressMap;
use crate::error::ReplayError;
use crate::port::{BusPort, MemoryPort};

/// A request sent to the memory slave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusRequest {
    /// Full-strobe write.
    Write {
        /// Byte address.
        addr: u64,
        /// Write data.
        data: u64,
    },
    /// Single-word read.
    Read {
        /// Byte address.
        addr: u64,
    },
}

/// The slave's answer to one [`BusRequest`].
#[derive(Debug)]
pub enum BusResponse {
    /// The write completed.
    WriteAck,
    /// Data returned by a read.
    ReadData(u64),
    /// The request could not be served.
    Fault(ReplayError),
}

/// Master side of the channel transport.
pub struct ChannelPort {
    requests: Sender<BusRequest>,
    responses: Receiver<BusResponse>,
    idle_cycles: u64,
}

impl ChannelPort {
    /// Idle cycles seen so far.
    pub fn idle_cycles(&self) -> u64 {
        self.idle_cycles
    }

    fn transact(&mut self, request: BusRequest) -> Result<BusResponse, ReplayError> {
        self.requests
            .send(request)
            .map_err(|_| ReplayError::Disconnected)?;
        self.responses.recv().map_err(|_| ReplayError::Disconnected)
    }
}

impl BusPort for ChannelPort {
    fn write(&mut self, addr: u64, data: u64) -> Result<(), ReplayError> {
        match self.transact(BusRequest::Write { addr, data })? {
            BusResponse::WriteAck => Ok(()),
            BusResponse::Fault(e) => Err(e),
            other => Err(ReplayError::Protocol {
                detail: format!("write to {addr:#x} answered with {other:?}"),
            }),
        }
    }

    fn read(&mut self, addr: u64) -> Result<u64, ReplayError> {
        match self.transact(BusRequest::Read { addr })? {
            BusResponse::ReadData(data) => Ok(data),
            BusResponse::Fault(e) => Err(e),
            other => Err(ReplayError::Protocol {
                detail: format!("read of {addr:#x} answered with {other:?}"),
            }),
        }
    }

    fn idle(&mut self, cycles: u64) {
        self.idle_cycles = self.idle_cycles.saturating_add(cycles);
    }
}

/// Join handle for a memory slave thread.
pub struct SlaveHandle<T> {
    handle: JoinHandle<BankedMemory<T>>,
}

impl<T> SlaveHandle<T> {
    /// Wait for the slave to exit and take the memory back.
    ///
    /// The slave only exits once every [`ChannelPort`] feeding it has been
    /// dropped, so drop the port first.
    pub fn join(self) -> Result<BankedMemory<T>, ReplayError> {
        self.handle.join().map_err(|_| ReplayError::SlavePanicked)
    }
}

/// Move `memory` onto a new thread that serves bus requests through `map`.
pub fn spawn_memory_slave<T>(
    memory: BankedMemory<T>,
    map: AddressMap,
) -> (ChannelPort, SlaveHandle<T>)
where
    T: Marshal + 'static,
{
    let (req_tx, req_rx) = crossbeam_channel::bounded(1);
    let (resp_tx, resp_rx) = crossbeam_channel::bounded(1);

    let handle = thread::spawn(move || slave_loop(memory, map, req_rx, resp_tx));

    let port = ChannelPort {
        requests: req_tx,
        responses: resp_rx,
        idle_cycles: 0,
    };
    (port, SlaveHandle { handle })
}

/// Serve requests until the request channel closes, then return the memory.
fn slave_loop<T: Marshal>(
    mut memory: BankedMemory<T>,
    map: AddressMap,
    requests: Receiver<BusRequest>,
    responses: Sender<BusResponse>,
) -> BankedMemory<T> {
    debug!("memory slave started ({} words)", map.capacity());
    let mut served = 0u64;
    {
        let mut port = MemoryPort::with_map(&mut memory, map);
        while let Ok(request) = requests.recv() {
            trace!("slave request {request:?}");
            let response = match request {
                BusRequest::Write { addr, data } => match port.write(addr, data) {
                    Ok(()) => BusResponse::WriteAck,
                    Err(e) => BusResponse::Fault(e),
                },
                BusRequest::Read { addr } => match port.read(addr) {
                    Ok(data) => BusResponse::ReadData(data),
                    Err(e) => BusResponse::Fault(e),
                },
            };
            if responses.send(response).is_err() {
                break;
            }
            served += 1;
        }
    }
    debug!("memory slave exiting after {served} requests");
    memory
}
