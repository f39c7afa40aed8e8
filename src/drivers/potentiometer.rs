//! Potentiometer driver (ADC1 oneshot, 12-bit, 11 dB attenuation).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: [`OneshotAdc`] talks to the ADC oneshot driver through raw
//! sys calls, one unit handle per channel.
//! On host/test: any [`AdcChannel`] mock.

use crate::config::ADC_MAX;
use crate::error::IoError;

/// One analog input channel returning raw counts.
pub trait AdcChannel {
    type Error: core::fmt::Debug;

    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

pub struct Potentiometer<A: AdcChannel> {
    adc: A,
}

impl<A: AdcChannel> Potentiometer<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Wiper position in raw counts, `0..=4095`.
    pub fn read(&mut self) -> Result<u16, IoError> {
        self.adc
            .read_raw()
            .map(|raw| raw.min(ADC_MAX))
            .map_err(|e| {
                log::debug!("adc: {:?}", e);
                IoError::AdcRead
            })
    }
}

#[cfg(target_os = "espidf")]
pub use esp::OneshotAdc;

#[cfg(target_os = "espidf")]
mod esp {
    use esp_idf_svc::sys::*;
    use log::info;

    use super::AdcChannel;

    /// ADC1 oneshot unit bound to a single channel.
    pub struct OneshotAdc {
        handle: adc_oneshot_unit_handle_t,
        channel: adc_channel_t,
    }

    impl OneshotAdc {
        /// Claim ADC1 and configure `channel` for 12-bit, 0–3.3 V readings.
        pub fn new(channel: u32) -> Result<Self, i32> {
            let init_cfg = adc_oneshot_unit_init_cfg_t {
                unit_id: adc_unit_t_ADC_UNIT_1,
                ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                ..Default::default()
            };
            let mut handle: adc_oneshot_unit_handle_t = core::ptr::null_mut();
            // SAFETY: called once from main() before the loop starts.
            let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &mut handle) };
            if ret != ESP_OK {
                return Err(ret);
            }

            // ADC_ATTEN_DB_12 is the renamed 11 dB setting.
            let chan_cfg = adc_oneshot_chan_cfg_t {
                atten: adc_atten_t_ADC_ATTEN_DB_12,
                bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
            };
            // SAFETY: handle was just created above.
            let ret = unsafe { adc_oneshot_config_channel(handle, channel, &chan_cfg) };
            if ret != ESP_OK {
                // SAFETY: handle is valid and not used after this point.
                unsafe { adc_oneshot_del_unit(handle) };
                return Err(ret);
            }

            info!("adc: ADC1 channel {} configured (12-bit, 11 dB)", channel);
            Ok(Self { handle, channel })
        }
    }

    impl AdcChannel for OneshotAdc {
        type Error = i32;

        fn read_raw(&mut self) -> Result<u16, i32> {
            let mut raw: i32 = 0;
            // SAFETY: handle is valid for the lifetime of self; main-loop only.
            let ret = unsafe { adc_oneshot_read(self.handle, self.channel, &mut raw) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(raw.max(0) as u16)
        }
    }

    impl Drop for OneshotAdc {
        fn drop(&mut self) {
            // SAFETY: handle is owned by self and never used again.
            unsafe { adc_oneshot_del_unit(self.handle) };
        }
    }
}
