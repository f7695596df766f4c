//! Fixed wire constants of the bootloader-entry exchange.

/// Command frame that asks the module to enter its bootloader.
pub const ENTER_BOOTLOADER: [u8; 8] = [0xFD, 0x00, 0x03, 0x00, 0x00, 0x03, 0x18, 0x0A];

/// Acknowledgment sent by modules already in the bootloader
/// (ASCII tail "Co_CPU_BLrQ").
pub const BOOTLOADER_REPLY: [u8; 17] = [
    0xFD, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x43, 0x6F, 0x5F, 0x43, 0x50, 0x55, 0x5F, 0x42, 0x4C,
    0x72, 0x51,
];

/// Acknowledgment sent by modules of the newer application generation
/// (ASCII tail "Co_CPU_App").
pub const BOOTLOADER_REPLY2: [u8; 16] = [
    0xFD, 0x00, 0x0D, 0x00, 0x00, 0x00, 0x43, 0x6F, 0x5F, 0x43, 0x50, 0x55, 0x5F, 0x41, 0x70,
    0x70,
];

/// True if the buffer's leading bytes equal either known bootloader
/// acknowledgment.
///
/// The comparison is a byte-exact prefix match: the buffer may carry extra
/// trailing bytes (the frame trailer) beyond the signature.
pub fn is_bootloader_reply(buf: &[u8]) -> bool {
    buf.starts_with(&BOOTLOADER_REPLY) || buf.starts_with(&BOOTLOADER_REPLY2)
}
