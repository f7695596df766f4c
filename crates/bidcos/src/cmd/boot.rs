use std::time::Duration;

use bidcos_boot::{enter_bootloader_with_config, CancelToken, HandshakeConfig, SystemClock};
use bidcos_channel::SerialChannel;
use bidcos_frame::hex_line;
use tracing::info;

use crate::cmd::BootArgs;
use crate::exit::{boot_error, channel_error, CliError, CliResult, INTERNAL, SUCCESS, USAGE};

pub fn run(args: BootArgs) -> CliResult<i32> {
    let timeout = args.timeout.as_deref().map(parse_duration).transpose()?;
    let retry_delay = parse_duration(&args.retry_delay)?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).map_err(|err| {
            CliError::new(INTERNAL, format!("failed to install signal handler: {err}"))
        })?;
    }

    let mut channel = SerialChannel::open(&args.device)
        .map_err(|err| channel_error("failed to open device", err))?;

    let config = HandshakeConfig {
        retry_delay,
        timeout,
        trace_frames: args.trace_frames,
        cancel,
        ..HandshakeConfig::default()
    };

    info!(device = %args.device.display(), "entering bootloader");
    let frame = enter_bootloader_with_config(&mut channel, &config, &SystemClock)
        .map_err(|err| boot_error("bootloader handshake failed", err))?;

    println!("{}", hex_line(frame.raw()));
    Ok(SUCCESS)
}

fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "duration must be greater than zero"));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        _ => Err(CliError::new(
            USAGE,
            format!("unsupported duration unit: {unit}"),
        )),
    }
}
