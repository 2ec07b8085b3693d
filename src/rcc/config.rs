/// AHB prescaler, CFGR.HPRE encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AhbPrescaler {
    #[default]
    Div1 = 0b0000,
    Div2 = 0b1000,
    Div4 = 0b1001,
    Div8 = 0b1010,
    Div16 = 0b1011,
    Div64 = 0b1100,
    Div128 = 0b1101,
    Div256 = 0b1110,
    Div512 = 0b1111,
}

impl AhbPrescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            AhbPrescaler::Div1 => 1,
            AhbPrescaler::Div2 => 2,
            AhbPrescaler::Div4 => 4,
            AhbPrescaler::Div8 => 8,
            AhbPrescaler::Div16 => 16,
            AhbPrescaler::Div64 => 64,
            AhbPrescaler::Div128 => 128,
            AhbPrescaler::Div256 => 256,
            AhbPrescaler::Div512 => 512,
        }
    }
}

/// APB prescaler, CFGR.PPRE1/PPRE2 encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApbPrescaler {
    #[default]
    Div1 = 0b000,
    Div2 = 0b100,
    Div4 = 0b101,
    Div8 = 0b110,
    Div16 = 0b111,
}

impl ApbPrescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            ApbPrescaler::Div1 => 1,
            ApbPrescaler::Div2 => 2,
            ApbPrescaler::Div4 => 4,
            ApbPrescaler::Div8 => 8,
            ApbPrescaler::Div16 => 16,
        }
    }
}

/// Clock configuration. SYSCLK always runs from HSI.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub ahb_prescaler: AhbPrescaler,
    pub apb1_prescaler: ApbPrescaler,
    pub apb2_prescaler: ApbPrescaler,
    /// Start the 32 kHz LSI and wait for it to be ready.
    pub lsi_enabled: bool,
}

impl Config {
    pub fn ahb_prescaler(mut self, prescaler: AhbPrescaler) -> Self {
        self.ahb_prescaler = prescaler;
        self
    }

    pub fn apb1_prescaler(mut self, prescaler: ApbPrescaler) -> Self {
        self.apb1_prescaler = prescaler;
        self
    }

    pub fn apb2_prescaler(mut self, prescaler: ApbPrescaler) -> Self {
        self.apb2_prescaler = prescaler;
        self
    }

    pub fn enable_lsi(mut self) -> Self {
        self.lsi_enabled = true;
        self
    }
}
