extern crate std;

use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};
use std::collections::VecDeque;

const MAX_FAKE_PACKET_SIZE: usize = 8;

/// One recorded or queued bus transfer
pub struct FakePacket {
    pub addr: u8,
    pub len: usize,
    pub buf: [u8; MAX_FAKE_PACKET_SIZE],
}

impl FakePacket {
    pub fn new_from_slice(addr: u8, slice: &[u8]) -> Self {
        let src_len = slice.len();
        let mut inst = Self {
            addr,
            len: src_len,
            buf: [0; MAX_FAKE_PACKET_SIZE],
        };
        inst.buf[..src_len].copy_from_slice(slice);
        inst
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Blocking I2C port that serves queued reads and records
/// every write and read request, in bus order.
pub struct FakeI2cPort {
    pub available_packets: VecDeque<FakePacket>,
    pub sent_packets: VecDeque<FakePacket>,
    /// (address, length) of every read, in order
    pub read_requests: VecDeque<(u8, usize)>,
    /// every transfer as (address, is_write), in order
    pub bus_log: VecDeque<(u8, bool)>,
}

impl FakeI2cPort {
    pub fn new() -> Self {
        FakeI2cPort {
            available_packets: VecDeque::with_capacity(8),
            sent_packets: VecDeque::with_capacity(16),
            read_requests: VecDeque::with_capacity(8),
            bus_log: VecDeque::with_capacity(24),
        }
    }

    /// Enqueue a packet to be returned by a later read of `addr`
    pub fn add_available_packet(&mut self, addr: u8, bytes: &[u8]) {
        let pack = FakePacket::new_from_slice(addr, bytes);
        self.available_packets.push_back(pack);
    }

    /// Bytes of every write, in order
    pub fn sent_bytes(&self) -> std::vec::Vec<u8> {
        self.sent_packets
            .iter()
            .flat_map(|p| p.bytes().iter().copied())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeI2cError;

impl embedded_hal::i2c::Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl ErrorType for FakeI2cPort {
    type Error = FakeI2cError;
}

impl embedded_hal::i2c::I2c for FakeI2cPort {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    self.bus_log.push_back((address, true));
                    self.sent_packets
                        .push_back(FakePacket::new_from_slice(address, bytes));
                }
                Operation::Read(buffer) => {
                    self.bus_log.push_back((address, false));
                    self.read_requests.push_back((address, buffer.len()));
                    // an empty queue or a mismatched address is a NACK
                    let next_pack = match self.available_packets.pop_front() {
                        Some(pack) if pack.addr == address => pack,
                        _ => return Err(FakeI2cError),
                    };
                    if next_pack.len != buffer.len() {
                        panic!(
                            "src_len {} dest_len {}",
                            next_pack.len,
                            buffer.len()
                        );
                    }
                    buffer.copy_from_slice(next_pack.bytes());
                }
            }
        }
        Ok(())
    }
}
