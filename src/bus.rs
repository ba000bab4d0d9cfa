use crate::error::MprlsError;

/// Raw transport to the sensor.
///
/// The MPRLS has no register map; the protocol is plain writes (command
/// frames) and plain reads (status byte or status+data frame). Keeping the
/// transport behind this trait lets the driver be tested against a scripted
/// fake bus.
pub trait Bus {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> impl Future<Output = Result<(), MprlsError<Self::Error>>>;

    fn read(
        &mut self,
        buffer: &mut [u8],
    ) -> impl Future<Output = Result<(), MprlsError<Self::Error>>>;
}

pub struct I2c<I2cType> {
    i2c: I2cType,
    address: u8,
}

impl<I2cType> I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    pub(crate) fn new(i2c: I2cType, address: u8) -> Self {
        Self { i2c, address }
    }
}

impl<I2cType> Bus for I2c<I2cType>
where
    I2cType: embedded_hal_async::i2c::I2c,
{
    type Error = <I2cType as embedded_hal_async::i2c::ErrorType>::Error;

    async fn write(&mut self, bytes: &[u8]) -> Result<(), MprlsError<Self::Error>> {
        self.i2c
            .write(self.address, bytes)
            .await
            .map_err(MprlsError::Bus)?;

        Ok(())
    }

    async fn read(&mut self, buffer: &mut [u8]) -> Result<(), MprlsError<Self::Error>> {
        self.i2c
            .read(self.address, buffer)
            .await
            .map_err(MprlsError::Bus)?;

        Ok(())
    }
}
