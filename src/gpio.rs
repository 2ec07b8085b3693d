use embedded_hal::digital::PinState;

use crate::error::{Error, Result};
use crate::exti::{Exti, ExtiLine};
use crate::pac::gpio::RegisterBlock;
use crate::pac::{GPIOA, GPIOB, GPIOC, GPIOD, GPIOE, GPIOF, GPIOG, GPIOH};
use crate::rcc::{PeripheralClock, Rcc};
use crate::syscfg::Syscfg;

/// Extension trait to constrain a GPIO port
pub trait GpioExt {
    /// Enables the port clock and wraps the register block.
    fn constrain(self, rcc: &Rcc) -> Gpio<'static>;
}

/// Declares a field enum whose discriminants are the register encoding.
macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            #[inline(always)]
            pub const fn bits(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for $name {
            type Error = Error;

            fn try_from(value: u32) -> Result<Self> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(Error::InvalidFieldValue(value)),
                }
            }
        }
    };
}

field_enum!(
    /// Pin mode, MODER encoding
    Mode {
        Input = 0,
        Output = 1,
        Alternate = 2,
        Analog = 3,
    }
);

field_enum!(
    /// Output driver, OTYPER encoding
    OutputType {
        PushPull = 0,
        OpenDrain = 1,
    }
);

field_enum!(
    /// Output slew rate, OSPEEDR encoding
    Speed {
        Low = 0,
        Medium = 1,
        Fast = 2,
        High = 3,
    }
);

field_enum!(
    /// Pull resistor, PUPDR encoding
    Pull {
        Floating = 0,
        PullUp = 1,
        PullDown = 2,
    }
);

field_enum!(
    /// Alternate function numbers
    AltFunction {
        AF0 = 0,
        AF1 = 1,
        AF2 = 2,
        AF3 = 3,
        AF4 = 4,
        AF5 = 5,
        AF6 = 6,
        AF7 = 7,
        AF8 = 8,
        AF9 = 9,
        AF10 = 10,
        AF11 = 11,
        AF12 = 12,
        AF13 = 13,
        AF14 = 14,
        AF15 = 15,
    }
);

/// Trigger edge
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SignalEdge {
    Rising,
    Falling,
    Both,
}

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Port {
    pub const ALL: [Port; 8] = [
        Port::A,
        Port::B,
        Port::C,
        Port::D,
        Port::E,
        Port::F,
        Port::G,
        Port::H,
    ];

    /// Port number as used by SYSCFG_EXTICRx
    pub const fn index(self) -> u32 {
        self as u32
    }

    pub const fn clock(self) -> PeripheralClock {
        match self {
            Port::A => PeripheralClock::GpioA,
            Port::B => PeripheralClock::GpioB,
            Port::C => PeripheralClock::GpioC,
            Port::D => PeripheralClock::GpioD,
            Port::E => PeripheralClock::GpioE,
            Port::F => PeripheralClock::GpioF,
            Port::G => PeripheralClock::GpioG,
            Port::H => PeripheralClock::GpioH,
        }
    }
}

impl TryFrom<u32> for Port {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Port::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidFieldValue(value))
    }
}

/// Pin index within a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Pin {
    P0 = 0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
    P10,
    P11,
    P12,
    P13,
    P14,
    P15,
}

impl Pin {
    pub const ALL: [Pin; 16] = [
        Pin::P0,
        Pin::P1,
        Pin::P2,
        Pin::P3,
        Pin::P4,
        Pin::P5,
        Pin::P6,
        Pin::P7,
        Pin::P8,
        Pin::P9,
        Pin::P10,
        Pin::P11,
        Pin::P12,
        Pin::P13,
        Pin::P14,
        Pin::P15,
    ];

    #[inline(always)]
    pub const fn index(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    const fn mask(self) -> u32 {
        1 << self.index()
    }
}

impl TryFrom<u8> for Pin {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Pin::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::InvalidPin(value))
    }
}

/// Complete configuration of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    pub mode: Mode,
    pub output_type: OutputType,
    pub speed: Speed,
    pub pull: Pull,
}

impl Default for PinConfig {
    /// Floating input, the reset state of most pins.
    fn default() -> Self {
        PinConfig {
            mode: Mode::Input,
            output_type: OutputType::PushPull,
            speed: Speed::Low,
            pull: Pull::Floating,
        }
    }
}

impl PinConfig {
    pub fn push_pull_output() -> Self {
        PinConfig {
            mode: Mode::Output,
            ..Default::default()
        }
    }

    pub fn open_drain_output() -> Self {
        PinConfig {
            mode: Mode::Output,
            output_type: OutputType::OpenDrain,
            ..Default::default()
        }
    }

    pub fn floating_input() -> Self {
        Default::default()
    }

    pub fn pullup_input() -> Self {
        PinConfig {
            pull: Pull::PullUp,
            ..Default::default()
        }
    }

    pub fn pulldown_input() -> Self {
        PinConfig {
            pull: Pull::PullDown,
            ..Default::default()
        }
    }

    pub fn analog() -> Self {
        PinConfig {
            mode: Mode::Analog,
            ..Default::default()
        }
    }

    pub fn alternate() -> Self {
        PinConfig {
            mode: Mode::Alternate,
            ..Default::default()
        }
    }

    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    pub fn output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }
}

/// Constrained GPIO port. The port clock stays on while the handle lives.
pub struct Gpio<'a> {
    port: Port,
    rb: &'a RegisterBlock,
}

impl core::fmt::Debug for Gpio<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gpio").field("port", &self.port).finish()
    }
}

macro_rules! gpio {
    ($($GPIO:ident: $port:ident,)+) => {
        $(
            impl GpioExt for $GPIO {
                fn constrain(self, rcc: &Rcc) -> Gpio<'static> {
                    Gpio::new(Port::$port, self.registers(), rcc)
                }
            }
        )+
    };
}

gpio!(
    GPIOA: A,
    GPIOB: B,
    GPIOC: C,
    GPIOD: D,
    GPIOE: E,
    GPIOF: F,
    GPIOG: G,
    GPIOH: H,
);

impl<'a> Gpio<'a> {
    pub(crate) fn new(port: Port, rb: &'a RegisterBlock, rcc: &Rcc) -> Self {
        rcc.enable(port.clock());
        Gpio { port, rb }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    /// Rewrite mode, output type, speed and pull of one pin.
    /// The fields of the other fifteen pins are left as they were.
    pub fn configure(&self, pin: Pin, config: PinConfig) {
        trace!("gpio{:?}: {:?} <- {:?}", self.port, pin, config);
        let wide = pin.index() * 2;

        critical_section::with(|_| {
            self.rb
                .otyper
                .write_field(pin.index(), 1, config.output_type.bits());
            self.rb.ospeedr.write_field(wide, 2, config.speed.bits());
            self.rb.pupdr.write_field(wide, 2, config.pull.bits());
            // Mode goes last: the pin never drives with stale output settings.
            self.rb.moder.write_field(wide, 2, config.mode.bits());
        });
    }

    /// Same as [`Gpio::configure`]; the port clock is already on.
    pub fn init(&self, pin: Pin, config: PinConfig) {
        self.configure(pin, config);
    }

    /// Current configuration of a pin, read back from the port.
    /// The reserved pull encoding 0b11 is reported as `InvalidFieldValue`.
    pub fn config(&self, pin: Pin) -> Result<PinConfig> {
        let wide = pin.index() * 2;
        Ok(PinConfig {
            mode: Mode::try_from(self.rb.moder.read_field(wide, 2))?,
            output_type: OutputType::try_from(self.rb.otyper.read_field(pin.index(), 1))?,
            speed: Speed::try_from(self.rb.ospeedr.read_field(wide, 2))?,
            pull: Pull::try_from(self.rb.pupdr.read_field(wide, 2))?,
        })
    }

    /// Select the alternate function routed to the pin.
    /// The pin also needs [`Mode::Alternate`] to use it.
    pub fn set_alternate_function(&self, pin: Pin, af: AltFunction) {
        let (afr, offset) = match pin.index() {
            i @ 0..=7 => (&self.rb.afrl, i * 4),
            i => (&self.rb.afrh, (i - 8) * 4),
        };
        critical_section::with(|_| afr.write_field(offset, 4, af.bits()));
    }

    /// Drive the pin through BSRR. A single store, nothing else on the port
    /// is read or written.
    #[inline]
    pub fn write(&self, pin: Pin, state: PinState) {
        match state {
            PinState::High => self.rb.bsrr.write(pin.mask()),
            PinState::Low => self.rb.bsrr.write(pin.mask() << 16),
        }
    }

    /// Sample the input data register.
    #[inline]
    pub fn read(&self, pin: Pin) -> PinState {
        PinState::from(self.rb.idr.bit_is_set(pin.index()))
    }

    /// Flip the output data bit with a read-modify-write of ODR.
    pub fn toggle(&self, pin: Pin) {
        critical_section::with(|_| self.rb.odr.modify(|r| r ^ pin.mask()));
    }

    /// Level the output data register asks for.
    #[inline]
    pub fn output_state(&self, pin: Pin) -> PinState {
        PinState::from(self.rb.odr.bit_is_set(pin.index()))
    }

    /// Borrow a single pin.
    pub fn pin(&self, pin: Pin) -> GpioPin<'_> {
        GpioPin {
            port: self.port,
            pin,
            rb: self.rb,
        }
    }

    /// Gate the port clock off. Pins keep their configuration but stop
    /// responding until [`Rcc::enable`] switches the port clock back on.
    pub fn free(self, rcc: &Rcc) {
        trace!("gpio{:?}: clock off", self.port);
        rcc.disable(self.port.clock());
    }
}

/// Single pin of a constrained port
pub struct GpioPin<'a> {
    port: Port,
    pin: Pin,
    rb: &'a RegisterBlock,
}

impl GpioPin<'_> {
    pub fn port(&self) -> Port {
        self.port
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// Route this pin to its EXTI line.
    pub fn make_interrupt_source(&mut self, syscfg: &Syscfg) {
        syscfg.select_exti_source(self.pin, self.port);
    }

    /// Unmask the pin's EXTI line and arm it on `edge`.
    pub fn trigger_on_edge(&mut self, edge: SignalEdge, exti: &Exti) {
        exti.listen(ExtiLine::from(self.pin), edge);
    }
}

impl embedded_hal::digital::ErrorType for GpioPin<'_> {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::InputPin for GpioPin<'_> {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.rb.idr.bit_is_set(self.pin.index()))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }
}

impl embedded_hal::digital::OutputPin for GpioPin<'_> {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.rb.bsrr.write(self.pin.mask());
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.rb.bsrr.write(self.pin.mask() << 16);
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for GpioPin<'_> {
    fn is_set_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.rb.odr.bit_is_set(self.pin.index()))
    }

    fn is_set_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_set_high().map(|v| !v)
    }

    fn toggle(&mut self) -> core::result::Result<(), Self::Error> {
        let mask = self.pin.mask();
        critical_section::with(|_| self.rb.odr.modify(|r| r ^ mask));
        Ok(())
    }
}
