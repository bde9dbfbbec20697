//! Published RFC 8439 test vectors, shared by the self-test and the test suite

/// A known-answer test for the full cipher
#[derive(Debug, Clone, Copy)]
pub struct CipherVector {
    pub name: &'static str,
    pub key: &'static str,
    pub nonce: &'static str,
    pub counter: u32,
    pub plaintext: &'static [u8],
    pub ciphertext: &'static str,
}

/// Key `00 01 .. 1f` used throughout RFC 8439 section 2
pub const SEQUENTIAL_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// RFC 8439 2.3.2: serialized block for counter 1
pub const BLOCK_FUNCTION: CipherVector = CipherVector {
    name: "rfc8439 2.3.2 block function",
    key: SEQUENTIAL_KEY,
    nonce: "000000090000004a00000000",
    counter: 1,
    plaintext: &[0u8; 64],
    ciphertext: concat!(
        "10f1e7e4d13b5915500fdd1fa32071c4",
        "c7d1f4c733c068030422aa9ac3d46c4e",
        "d2826446079faa0914c2d705d98b02a2",
        "b5129cd1de164eb9cbd083e8a2503c4e",
    ),
};

/// RFC 8439 2.4.2: the "sunscreen" message
pub const SUNSCREEN: CipherVector = CipherVector {
    name: "rfc8439 2.4.2 encryption",
    key: SEQUENTIAL_KEY,
    nonce: "000000000000004a00000000",
    counter: 1,
    plaintext: b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.",
    ciphertext: concat!(
        "6e2e359a2568f98041ba0728dd0d6981",
        "e97e7aec1d4360c20a27afccfd9fae0b",
        "f91b65c5524733ab8f593dabcd62b357",
        "1639d624e65152ab8f530c359f0861d8",
        "07ca0dbf500d6a6156a38e088a22b65e",
        "52bc514d16ccf806818ce91ab7793736",
        "5af90bbf74a35be6b40b8eedf2785e42",
        "874d",
    ),
};

/// RFC 8439 A.1 test vector 1: all-zero key, nonce and counter
pub const ZERO_KEY: CipherVector = CipherVector {
    name: "rfc8439 A.1 #1 zero key",
    key: "0000000000000000000000000000000000000000000000000000000000000000",
    nonce: "000000000000000000000000",
    counter: 0,
    plaintext: &[0u8; 64],
    ciphertext: concat!(
        "76b8e0ada0f13d90405d6ae55386bd28",
        "bdd219b8a08ded1aa836efcc8b770dc7",
        "da41597c5157488d7724e03fb8d84a37",
        "6a43b8f41518a11cc387b669b2ee6586",
    ),
};

pub const ALL: [CipherVector; 3] = [BLOCK_FUNCTION, SUNSCREEN, ZERO_KEY];
