//! System initialization and clock configuration for STM32H753.

use embassy_stm32::{rcc::*, Config, Peripherals};

/// Initialize the STM32H753 with the servo controller clock tree.
///
/// - **480 MHz** system clock using PLL1 from HSI
/// - **240 MHz** AHB clock
/// - **120 MHz** APB clocks, so TIM1 and USART1 run from a 240 MHz / 120 MHz kernel clock
///
/// # Returns
///
/// The initialized [`Peripherals`] struct containing all STM32 peripheral instances.
pub fn init_system() -> Peripherals {
    let mut config = Config::default();

    // Enable high-speed internal oscillator (16 MHz)
    config.rcc.hsi = Some(HSIPrescaler::DIV1);

    // Low-power internal oscillator, kept as a backup clock source
    config.rcc.csi = true;

    // PLL1 = HSI(16MHz) / 4 * 60 / 2 = 480MHz
    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,   // Internal 16MHz oscillator
        prediv: PllPreDiv::DIV4,  // DIVM1=4 -> 4MHz PLL input
        mul: PllMul::MUL60,       // DIVN1=60 -> 240MHz VCO
        divp: Some(PllDiv::DIV2), // DIVP1=2 -> 480MHz output
        divq: None,               // Q output not used
        divr: None,               // R output not used
    });

    // System clock configuration
    config.rcc.sys = Sysclk::PLL1_P;         // 480 MHz system clock
    config.rcc.ahb_pre = AHBPrescaler::DIV2; // 240 MHz AHB clock
    config.rcc.apb1_pre = APBPrescaler::DIV2; // 120 MHz APB1 clock (TIM2 time driver)
    config.rcc.apb2_pre = APBPrescaler::DIV2; // 120 MHz APB2 clock (USART1, TIM1)
    config.rcc.apb3_pre = APBPrescaler::DIV2; // 120 MHz APB3 clock
    config.rcc.apb4_pre = APBPrescaler::DIV2; // 120 MHz APB4 clock

    // Maximum voltage scaling for 480MHz operation
    config.rcc.voltage_scale = VoltageScale::Scale0;

    embassy_stm32::init(config)
}
