use crate::header::FrameError;

/// Number of payload bytes occupied by the class and method identifiers at
/// the start of every method frame.
pub const METHOD_PREFIX_LEN: usize = 4;

/// Argument codec for a single protocol method.
///
/// Method frames carry a `(class_id, method_id)` pair followed by
/// method-specific arguments whose layout is defined per method by the
/// protocol's class grammar, not by the framing layer. Implement this trait
/// for each method your application speaks; [`MethodPayload`] then converts
/// between the typed arguments and the opaque wire bytes without the codec
/// hard-coding a method table.
pub trait MethodDescriptor: Sized {
    /// Class identifier the method belongs to.
    const CLASS_ID: u16;
    /// Method identifier within the class.
    const METHOD_ID: u16;

    /// Appends the serialized argument bytes to `out`.
    fn encode_arguments(&self, out: &mut Vec<u8>);

    /// Parses the argument bytes that follow the class/method prefix.
    fn decode_arguments(arguments: &[u8]) -> Result<Self, FrameError>;
}

/// The payload of a method frame: a class/method pair and opaque argument
/// bytes.
///
/// Decoding stops at the abstract contract: the identifiers are parsed from
/// the first four payload bytes and the remainder is kept verbatim. Typed
/// access goes through [`MethodPayload::decode_method`] with a
/// caller-supplied [`MethodDescriptor`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodPayload {
    class_id: u16,
    method_id: u16,
    arguments: Vec<u8>,
}

impl MethodPayload {
    /// Constructs a method payload from raw parts.
    #[must_use]
    pub fn new(class_id: u16, method_id: u16, arguments: Vec<u8>) -> Self {
        Self {
            class_id,
            method_id,
            arguments,
        }
    }

    /// Serializes a typed method into a payload value.
    #[must_use]
    pub fn from_method<M: MethodDescriptor>(method: &M) -> Self {
        let mut arguments = Vec::new();
        method.encode_arguments(&mut arguments);
        Self::new(M::CLASS_ID, M::METHOD_ID, arguments)
    }

    /// Returns the class identifier parsed from the payload prefix.
    #[must_use]
    #[inline]
    pub const fn class_id(&self) -> u16 {
        self.class_id
    }

    /// Returns the method identifier parsed from the payload prefix.
    #[must_use]
    #[inline]
    pub const fn method_id(&self) -> u16 {
        self.method_id
    }

    /// Returns the `(class_id, method_id)` pair that selects the method.
    #[must_use]
    #[inline]
    pub const fn method_type(&self) -> (u16, u16) {
        (self.class_id, self.method_id)
    }

    /// Returns the opaque argument bytes following the prefix.
    #[must_use]
    #[inline]
    pub fn arguments(&self) -> &[u8] {
        &self.arguments
    }

    /// Consumes the payload and returns the owned argument bytes.
    #[must_use]
    #[inline]
    pub fn into_arguments(self) -> Vec<u8> {
        self.arguments
    }

    /// Returns the number of bytes this payload occupies on the wire.
    #[must_use]
    #[inline]
    pub fn encoded_len(&self) -> usize {
        METHOD_PREFIX_LEN + self.arguments.len()
    }

    pub(crate) fn prefix_bytes(&self) -> [u8; METHOD_PREFIX_LEN] {
        let mut bytes = [0u8; METHOD_PREFIX_LEN];
        bytes[..2].copy_from_slice(&self.class_id.to_be_bytes());
        bytes[2..].copy_from_slice(&self.method_id.to_be_bytes());
        bytes
    }

    /// Appends the encoded payload (prefix plus arguments) to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.prefix_bytes());
        out.extend_from_slice(&self.arguments);
    }

    /// Parses a method-frame payload.
    ///
    /// Requires at least [`METHOD_PREFIX_LEN`] bytes for the class/method
    /// identifiers; everything after the prefix is kept as opaque argument
    /// bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < METHOD_PREFIX_LEN {
            return Err(FrameError::MalformedFrame {
                expected: METHOD_PREFIX_LEN,
                actual: bytes.len(),
            });
        }

        let class_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        let method_id = u16::from_be_bytes([bytes[2], bytes[3]]);

        Ok(Self {
            class_id,
            method_id,
            arguments: bytes[METHOD_PREFIX_LEN..].to_vec(),
        })
    }

    /// Decodes the arguments as the method `M`, after checking that the
    /// payload actually selects `M`'s class/method pair.
    pub fn decode_method<M: MethodDescriptor>(&self) -> Result<M, FrameError> {
        if self.method_type() != (M::CLASS_ID, M::METHOD_ID) {
            return Err(FrameError::UnexpectedMethod {
                expected_class: M::CLASS_ID,
                expected_method: M::METHOD_ID,
                actual_class: self.class_id,
                actual_method: self.method_id,
            });
        }

        M::decode_arguments(&self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `connection.tune-ok` arguments: the shape of a small fixed-layout
    /// method, used here to exercise the descriptor seam.
    #[derive(Debug, Eq, PartialEq)]
    struct TuneOk {
        channel_max: u16,
        frame_max: u32,
        heartbeat: u16,
    }

    impl MethodDescriptor for TuneOk {
        const CLASS_ID: u16 = 10;
        const METHOD_ID: u16 = 31;

        fn encode_arguments(&self, out: &mut Vec<u8>) {
            out.extend_from_slice(&self.channel_max.to_be_bytes());
            out.extend_from_slice(&self.frame_max.to_be_bytes());
            out.extend_from_slice(&self.heartbeat.to_be_bytes());
        }

        fn decode_arguments(arguments: &[u8]) -> Result<Self, FrameError> {
            if arguments.len() < 8 {
                return Err(FrameError::MalformedFrame {
                    expected: 8,
                    actual: arguments.len(),
                });
            }
            Ok(Self {
                channel_max: u16::from_be_bytes([arguments[0], arguments[1]]),
                frame_max: u32::from_be_bytes([
                    arguments[2],
                    arguments[3],
                    arguments[4],
                    arguments[5],
                ]),
                heartbeat: u16::from_be_bytes([arguments[6], arguments[7]]),
            })
        }
    }

    #[test]
    fn payload_round_trips_through_raw_bytes() {
        let payload = MethodPayload::new(60, 40, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let mut bytes = Vec::new();
        payload.encode_into(&mut bytes);

        assert_eq!(bytes[..4], [0x00, 0x3C, 0x00, 0x28]);
        let decoded = MethodPayload::decode(&bytes).expect("decode succeeds");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn decode_rejects_payload_shorter_than_prefix() {
        let err = MethodPayload::decode(&[0x00, 0x0A]).unwrap_err();
        assert_eq!(
            err,
            FrameError::MalformedFrame {
                expected: METHOD_PREFIX_LEN,
                actual: 2,
            }
        );
    }

    #[test]
    fn decode_accepts_prefix_only_payload() {
        let decoded = MethodPayload::decode(&[0x00, 0x0A, 0x00, 0x33]).expect("decode succeeds");
        assert_eq!(decoded.method_type(), (10, 51));
        assert!(decoded.arguments().is_empty());
    }

    #[test]
    fn typed_method_round_trips_through_descriptor() {
        let tune_ok = TuneOk {
            channel_max: 2047,
            frame_max: 131_072,
            heartbeat: 60,
        };

        let payload = MethodPayload::from_method(&tune_ok);
        assert_eq!(payload.method_type(), (10, 31));
        assert_eq!(payload.encoded_len(), METHOD_PREFIX_LEN + 8);

        let decoded: TuneOk = payload.decode_method().expect("decode succeeds");
        assert_eq!(decoded, tune_ok);
    }

    #[test]
    fn decode_method_rejects_mismatched_selector() {
        let payload = MethodPayload::new(20, 10, Vec::new());
        let err = payload.decode_method::<TuneOk>().unwrap_err();
        assert_eq!(
            err,
            FrameError::UnexpectedMethod {
                expected_class: 10,
                expected_method: 31,
                actual_class: 20,
                actual_method: 10,
            }
        );
    }

    #[test]
    fn decode_method_surfaces_argument_errors() {
        let payload = MethodPayload::new(10, 31, vec![0x00]);
        let err = payload.decode_method::<TuneOk>().unwrap_err();
        assert_eq!(
            err,
            FrameError::MalformedFrame {
                expected: 8,
                actual: 1,
            }
        );
    }
}
