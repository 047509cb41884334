//! I2C sensor drivers.
//!
//! Both drivers are generic over [`embedded_hal::i2c::I2c`], so the firmware
//! hands them the HAL bus and the tests hand them a scripted fake.

pub mod lis2dh12;
pub mod tmp112;

pub use lis2dh12::Lis2dh12;
pub use tmp112::Tmp112;

/// Driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transaction failed
    Bus(E),
    /// The identification register returned an unexpected value
    InvalidDevice(u8),
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Bus(e)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::VecDeque;
    use std::vec::Vec;

    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

    /// Bus that logs writes and answers reads from a script.
    #[derive(Default)]
    pub struct FakeBus {
        pub writes: Vec<(u8, Vec<u8>)>,
        pub responses: VecDeque<Vec<u8>>,
        pub nack: bool,
    }

    impl FakeBus {
        pub fn with_responses(responses: &[&[u8]]) -> Self {
            Self {
                responses: responses.iter().map(|r| r.to_vec()).collect(),
                ..Default::default()
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = ErrorKind;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.nack {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                    Operation::Read(buffer) => {
                        let data = self.responses.pop_front().ok_or(ErrorKind::Other)?;
                        buffer.copy_from_slice(&data);
                    }
                }
            }
            Ok(())
        }
    }
}
