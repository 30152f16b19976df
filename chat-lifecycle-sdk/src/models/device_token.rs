/// Token issued by the OS push subsystem. A new registration produces a new token, existing ones are never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceToken(Vec<u8>);

impl DeviceToken {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex, the way the token usually shows up in push consoles.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}
