//! LED implementations
//!
//! - Single PWM-dimmed LEDs
//! - RGB LEDs on three PWM channels (common cathode or common anode)

pub mod pwm;
pub mod rgb;

pub use pwm::PwmLed;
pub use rgb::RgbPwmLed;

use embedded_hal::pwm::SetDutyCycle;
use perikit_hal::PortFault;

/// Drive `channel` to `fraction` of full duty, rounded to the nearest count
///
/// `inverted` channels (common anode) sink current, so full brightness is
/// zero duty.
pub(crate) fn set_fraction<P: SetDutyCycle>(
    channel: &mut P,
    fraction: f32,
    inverted: bool,
) -> Result<(), PortFault> {
    let max = channel.max_duty_cycle();
    let on = libm::roundf(fraction.clamp(0.0, 1.0) * max as f32) as u16;
    let duty = if inverted { max - on.min(max) } else { on.min(max) };

    channel
        .set_duty_cycle(duty)
        .map_err(|_| PortFault::WriteFailed)
}
