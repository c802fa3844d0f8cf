/*!
 * Common test utilities shared across the test suite
 */

use subalign::app_config::Config;
use subalign::app_controller::Controller;

/// A well-formed two-entry SRT in the exact shape the codec emits
pub fn sample_srt() -> String {
    "1\n00:00:01,000 --> 00:00:03,000\n<b>今天天汽很好。</b>\n\n\
     2\n00:00:03,500 --> 00:00:05,000\n<b>我们去公园。</b>\n"
        .to_string()
}

/// Reference script matching [`sample_srt`], with one transcription error fixed
pub fn sample_script() -> String {
    "# 第一集\n\n[旁白] 今天天气很好。我们去公园。\n".to_string()
}

/// A controller built from the default configuration
pub fn default_controller() -> Controller {
    Controller::with_config(Config::default()).expect("default controller should build")
}
