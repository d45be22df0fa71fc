use gather_config::BrowserConfig;
use serde_json::json;
use webdriver::capabilities::Capabilities;

/// Construct Chrome command-line arguments for a browser configuration.
pub fn build_chrome_arguments(config: &BrowserConfig) -> Vec<String> {
    let mut args = Vec::with_capacity(3);
    if config.headless {
        args.push("--headless".to_string());
        args.push("--disable-gpu".to_string());
    }
    args.push(format!("--user-agent={}", config.user_agent));
    args
}

/// WebDriver capabilities requesting a Chrome session with [`build_chrome_arguments`].
pub fn build_capabilities(config: &BrowserConfig) -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": build_chrome_arguments(config) }),
    );
    caps
}
