use bidcos_channel::SerialChannel;
use bidcos_frame::{hex_line, FrameConfig, FrameReader};

use crate::cmd::DumpArgs;
use crate::exit::{channel_error, frame_error, CliResult, SUCCESS};

pub fn run(args: DumpArgs) -> CliResult<i32> {
    let channel = SerialChannel::open(&args.device)
        .map_err(|err| channel_error("failed to open device", err))?;

    let config = FrameConfig {
        max_frame_size: args.max_frame_size,
    };
    let mut reader = FrameReader::with_config(channel, config);

    for _ in 0..args.count {
        let frame = reader
            .read_frame()
            .map_err(|err| frame_error("frame read failed", err))?;
        println!("{}", hex_line(frame.raw()));
    }

    Ok(SUCCESS)
}
