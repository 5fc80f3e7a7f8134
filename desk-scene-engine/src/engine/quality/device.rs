use crate::engine::quality::tier::QualityTier;

/// Static capability signals sampled once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSignals {
    pub logical_cores: u32,
    pub device_pixel_ratio: f64,
    /// 2 for a WebGL2-class context, 1 for WebGL1, 0 when none could be created.
    pub graphics_context_version: u32,
    pub mobile: bool,
}

const MOBILE_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let user_agent = user_agent.to_ascii_lowercase();
    MOBILE_MARKERS
        .iter()
        .any(|marker| user_agent.contains(marker))
}

pub fn classify(signals: &DeviceSignals) -> QualityTier {
    if signals.mobile
        || signals.logical_cores <= 2
        || signals.graphics_context_version < 2
        || signals.device_pixel_ratio < 1.0
    {
        QualityTier::Low
    } else if signals.logical_cores <= 4 || signals.device_pixel_ratio < 2.0 {
        QualityTier::Medium
    } else {
        QualityTier::High
    }
}

#[cfg(target_arch = "wasm32")]
pub fn detect_device_signals() -> DeviceSignals {
    let Some(window) = web_sys::window() else {
        return DeviceSignals {
            logical_cores: 1,
            device_pixel_ratio: 1.0,
            graphics_context_version: 0,
            mobile: false,
        };
    };

    let navigator = window.navigator();
    let cores = navigator.hardware_concurrency();
    let ratio = window.device_pixel_ratio();

    DeviceSignals {
        logical_cores: if cores >= 1.0 { cores as u32 } else { 2 },
        device_pixel_ratio: if ratio > 0.0 { ratio } else { 1.0 },
        graphics_context_version: probe_graphics_context(&window),
        mobile: navigator
            .user_agent()
            .map(|agent| is_mobile_user_agent(&agent))
            .unwrap_or(false),
    }
}

#[cfg(target_arch = "wasm32")]
fn probe_graphics_context(window: &web_sys::Window) -> u32 {
    use wasm_bindgen::JsCast;

    let Some(canvas) = window
        .document()
        .and_then(|document| document.create_element("canvas").ok())
        .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
    else {
        return 0;
    };

    if matches!(canvas.get_context("webgl2"), Ok(Some(_))) {
        2
    } else if matches!(canvas.get_context("webgl"), Ok(Some(_))) {
        1
    } else {
        0
    }
}

/// Desktop profile: the native build always has a full graphics context.
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_device_signals() -> DeviceSignals {
    let logical_cores = std::thread::available_parallelism()
        .map(|cores| cores.get() as u32)
        .unwrap_or(4);

    DeviceSignals {
        logical_cores,
        device_pixel_ratio: 2.0,
        graphics_context_version: 2,
        mobile: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> DeviceSignals {
        DeviceSignals {
            logical_cores: 8,
            device_pixel_ratio: 2.0,
            graphics_context_version: 2,
            mobile: false,
        }
    }

    #[test]
    fn strong_desktop_is_high() {
        assert_eq!(classify(&desktop()), QualityTier::High);
    }

    #[test]
    fn any_weak_signal_means_low() {
        let mobile = DeviceSignals { mobile: true, ..desktop() };
        let dual_core = DeviceSignals { logical_cores: 2, ..desktop() };
        let no_webgl2 = DeviceSignals { graphics_context_version: 1, ..desktop() };
        let no_context = DeviceSignals { graphics_context_version: 0, ..desktop() };
        let low_dpr = DeviceSignals { device_pixel_ratio: 0.75, ..desktop() };

        for signals in [mobile, dual_core, no_webgl2, no_context, low_dpr] {
            assert_eq!(classify(&signals), QualityTier::Low, "{signals:?}");
        }
    }

    #[test]
    fn quad_core_or_standard_density_is_medium() {
        let quad = DeviceSignals { logical_cores: 4, ..desktop() };
        let standard_dpr = DeviceSignals { device_pixel_ratio: 1.0, ..desktop() };
        assert_eq!(classify(&quad), QualityTier::Medium);
        assert_eq!(classify(&standard_dpr), QualityTier::Medium);
    }

    #[test]
    fn mobile_user_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36"
        ));
    }
}
