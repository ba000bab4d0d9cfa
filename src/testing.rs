use crate::bus::Bus;
use crate::error::MprlsError;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use heapless::{Deque, Vec};

/// Scripted bus double for the MPRLS protocol.
///
/// Reads are served by transfer length: 1-byte reads pop from the status
/// queue, 4-byte reads pop from the data-frame queue. An unmocked read
/// panics, which doubles as an assertion that a code path performed no more
/// transactions than the test scripted.
pub struct FakeBus {
    status: Deque<u8, 32>,
    status_fallback: Option<u8>,
    data: Deque<[u8; 4], 8>,
    writes: Vec<[u8; 3], 8>,
    fail_reads: bool,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            status: Deque::new(),
            status_fallback: None,
            data: Deque::new(),
            writes: Vec::new(),
            fail_reads: false,
        }
    }

    /// A bus on which every read fails, as if no device acknowledged.
    pub fn failing() -> Self {
        let mut bus = Self::new();
        bus.fail_reads = true;

        bus
    }

    /// Queues one status byte response.
    pub fn with_status(&mut self, bits: u8) {
        self.status.push_back(bits).unwrap();
    }

    /// Serves `bits` for every status read once the queue is drained.
    pub fn with_status_repeated(&mut self, bits: u8) {
        self.status_fallback = Some(bits);
    }

    /// Queues one 4-byte status+data frame response.
    pub fn with_data(&mut self, frame: [u8; 4]) {
        self.data.push_back(frame).unwrap();
    }

    /// The command frames written to the bus, in order.
    pub fn writes(&self) -> &[[u8; 3]] {
        &self.writes
    }
}

impl Bus for FakeBus {
    type Error = ();

    async fn write(&mut self, bytes: &[u8]) -> Result<(), MprlsError<Self::Error>> {
        self.writes
            .push(bytes.try_into().expect("unexpected write length"))
            .unwrap();

        Ok(())
    }

    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), MprlsError<Self::Error>> {
        if self.fail_reads {
            return Err(MprlsError::Bus(()));
        }

        match buffer.len() {
            1 => {
                buffer[0] = self
                    .status
                    .pop_front()
                    .or(self.status_fallback)
                    .expect("no mocked status byte")
            }
            4 => {
                buffer.copy_from_slice(&self.data.pop_front().expect("no mocked data frame"));
            }
            n => panic!("unexpected read length {n}"),
        }

        Ok(())
    }
}

/// Delay double that only tallies the requested time.
pub struct CountingDelay {
    elapsed_ns: u64,
}

impl CountingDelay {
    pub fn new() -> Self {
        CountingDelay { elapsed_ns: 0 }
    }

    pub fn total_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

/// End-of-conversion pin double that goes high after a fixed number of polls.
pub struct FakeEocPin {
    high_after: Option<u32>,
    polls: u32,
}

impl FakeEocPin {
    pub fn high_after(polls: u32) -> Self {
        FakeEocPin {
            high_after: Some(polls),
            polls: 0,
        }
    }

    pub fn never_ready() -> Self {
        FakeEocPin {
            high_after: None,
            polls: 0,
        }
    }
}

impl ErrorType for FakeEocPin {
    type Error = core::convert::Infallible;
}

impl InputPin for FakeEocPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.polls += 1;

        Ok(self.high_after.is_some_and(|n| self.polls > n))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Reset pin double that records every level transition.
pub struct FakeResetPin {
    levels: Vec<bool, 8>,
}

impl FakeResetPin {
    pub fn new() -> Self {
        FakeResetPin { levels: Vec::new() }
    }

    pub fn levels(&self) -> &[bool] {
        &self.levels
    }
}

impl ErrorType for FakeResetPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for FakeResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false).unwrap();

        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true).unwrap();

        Ok(())
    }
}
