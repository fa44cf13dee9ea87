//! Named standard curves.
//!
//! Parameters are embedded as hex strings (a leading `-` marks a negative
//! coefficient) and parsed once, on first use, into shared [`Curve`] handles.

use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};

use crate::curve::{Curve, CurveParameters};
use crate::error::{Error, Result};
use crate::model::CurveForm;

struct NamedCurve {
    name: &'static str,
    aliases: &'static [&'static str],
    form: CurveForm,
    p: &'static str,
    c1: &'static str,
    c2: &'static str,
    n: &'static str,
    h: &'static str,
    gx: &'static str,
    gy: &'static str,
    bits: u32,
}

const P25519: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";
const N25519: &str = "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed";
const P448: &str = "fffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
const N448: &str = "3fffffffffffffffffffffffffffffffffffffffffffffffffffffff7cca23e9c44edb49aed63690216cc2728dc58f552378c292ab5844f3";

static STANDARD_CURVES: [NamedCurve; 12] = [
    NamedCurve {
        name: "secp192r1",
        aliases: &["P-192", "prime192v1"],
        form: CurveForm::ShortWeierstrass,
        p: "fffffffffffffffffffffffffffffffeffffffffffffffff",
        c1: "-3",
        c2: "64210519e59c80e70fa7e9ab72243049feb8deecc146b9b1",
        n: "ffffffffffffffffffffffff99def836146bc9b1b4d22831",
        h: "1",
        gx: "188da80eb03090f67cbf20eb43a18800f4ff0afd82ff1012",
        gy: "07192b95ffc8da78631011ed6b24cdd573f977a11e794811",
        bits: 192,
    },
    NamedCurve {
        name: "secp224r1",
        aliases: &["P-224"],
        form: CurveForm::ShortWeierstrass,
        p: "ffffffffffffffffffffffffffffffff000000000000000000000001",
        c1: "-3",
        c2: "b4050a850c04b3abf54132565044b0b7d7bfd8ba270b39432355ffb4",
        n: "ffffffffffffffffffffffffffff16a2e0b8f03e13dd29455c5c2a3d",
        h: "1",
        gx: "b70e0cbd6bb4bf7f321390b94a03c1d356c21122343280d6115c1d21",
        gy: "bd376388b5f723fb4c22dfe6cd4375a05a07476444d5819985007e34",
        bits: 224,
    },
    NamedCurve {
        name: "secp256k1",
        aliases: &[],
        form: CurveForm::ShortWeierstrass,
        p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        c1: "0",
        c2: "7",
        n: "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
        h: "1",
        gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        gy: "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
        bits: 256,
    },
    NamedCurve {
        name: "secp256r1",
        aliases: &["P-256", "prime256v1"],
        form: CurveForm::ShortWeierstrass,
        p: "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        c1: "-3",
        c2: "5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b",
        n: "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
        h: "1",
        gx: "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296",
        gy: "4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5",
        bits: 256,
    },
    NamedCurve {
        name: "secp384r1",
        aliases: &["P-384"],
        form: CurveForm::ShortWeierstrass,
        p: "fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeffffffff0000000000000000ffffffff",
        c1: "-3",
        c2: "b3312fa7e23ee7e4988e056be3f82d19181d9c6efe8141120314088f5013875ac656398d8a2ed19d2a85c8edd3ec2aef",
        n: "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf581a0db248b0a77aecec196accc52973",
        h: "1",
        gx: "aa87ca22be8b05378eb1c71ef320ad746e1d3b628ba79b9859f741e082542a385502f25dbf55296c3a545e3872760ab7",
        gy: "3617de4a96262c6f5d9e98bf9292dc29f8f41dbd289a147ce9da3113b5f0b8c00a60b1ce1d7e819d7a431d7c90ea0e5f",
        bits: 384,
    },
    NamedCurve {
        name: "secp521r1",
        aliases: &["P-521"],
        form: CurveForm::ShortWeierstrass,
        p: "01ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        c1: "-3",
        c2: "0051953eb9618e1c9a1f929a21a0b68540eea2da725b99b315f3b8b489918ef109e156193951ec7e937b1652c0bd3bb1bf073573df883d2c34f1ef451fd46b503f00",
        n: "01fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffa51868783bf2f966b7fcc0148f709a5d03bb5c9b8899c47aebb6fb71e91386409",
        h: "1",
        gx: "00c6858e06b70404e9cd9e3ecb662395b4429c648139053fb521f828af606b4d3dbaa14b5e77efe75928fe1dc127a2ffa8de3348b3c1856a429bf97e7e31c2e5bd66",
        gy: "011839296a789a3bc0045c8a5fb42c7d1bd998f54449579b446817afbd17273e662c97ee72995ef42640c550b9013fad0761353c7086a272c24088be94769fd16650",
        bits: 521,
    },
    NamedCurve {
        name: "brainpoolP256r1",
        aliases: &[],
        form: CurveForm::ShortWeierstrass,
        p: "a9fb57dba1eea9bc3e660a909d838d726e3bf623d52620282013481d1f6e5377",
        c1: "7d5a0975fc2c3057eef67530417affe7fb8055c126dc5c6ce94a4b44f330b5d9",
        c2: "26dc5c6ce94a4b44f330b5d9bbd77cbf958416295cf7e1ce6bccdc18ff8c07b6",
        n: "a9fb57dba1eea9bc3e660a909d838d718c397aa3b561a6f7901e0e82974856a7",
        h: "1",
        gx: "8bd2aeb9cb7e57cb2c4b482ffc81b7afb9de27e1e3bd23c23a4453bd9ace3262",
        gy: "547ef835c3dac4fd97f8461a14611dc9c27745132ded8e545c1d54c72f046997",
        bits: 256,
    },
    NamedCurve {
        name: "brainpoolP384r1",
        aliases: &[],
        form: CurveForm::ShortWeierstrass,
        p: "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b412b1da197fb71123acd3a729901d1a71874700133107ec53",
        c1: "7bc382c63d8c150c3c72080ace05afa0c2bea28e4fb22787139165efba91f90f8aa5814a503ad4eb04a8c7dd22ce2826",
        c2: "04a8c7dd22ce28268b39b55416f0447c2fb77de107dcd2a62e880ea53eeb62d57cb4390295dbc9943ab78696fa504c11",
        n: "8cb91e82a3386d280f5d6f7e50e641df152f7109ed5456b31f166e6cac0425a7cf3ab6af6b7fc3103b883202e9046565",
        h: "1",
        gx: "1d1c64f068cf45ffa2a63a81b7c13f6b8847a3e77ef14fe3db7fcafe0cbd10e8e826e03436d646aaef87b2e247d4af1e",
        gy: "8abe1d7520f9c2a45cb1eb8e95cfd55262b70b29feec5864e19c054ff99129280e4646217791811142820341263c5315",
        bits: 384,
    },
    NamedCurve {
        name: "Curve25519",
        aliases: &["X25519"],
        form: CurveForm::Montgomery,
        p: P25519,
        c1: "1",
        c2: "76d06",
        n: N25519,
        h: "8",
        gx: "9",
        gy: "20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9",
        bits: 255,
    },
    NamedCurve {
        name: "Ed25519",
        aliases: &[],
        form: CurveForm::TwistedEdwards,
        p: P25519,
        c1: "-1",
        c2: "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3",
        n: N25519,
        h: "8",
        gx: "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
        gy: "6666666666666666666666666666666666666666666666666666666666666658",
        bits: 255,
    },
    NamedCurve {
        name: "Curve448",
        aliases: &["X448"],
        form: CurveForm::Montgomery,
        p: P448,
        c1: "1",
        c2: "262a6",
        n: N448,
        h: "4",
        gx: "5",
        gy: "7d235d1295f5b1f66c98ab6e58326fcecbae5d34f55545d060f75dc28df3f6edb8027e2346430d211312c4b150677af76fd7223d457b5b1a",
        bits: 448,
    },
    NamedCurve {
        name: "Ed448",
        aliases: &[],
        form: CurveForm::Edwards,
        p: P448,
        c1: "1",
        c2: "-98a9",
        n: N448,
        h: "4",
        gx: "4f1970c66bed0ded221d15a622bf36da9e146570470f1767ea6de324a3d3a46412ae1af72ab66511433b80e18b00938e2626a82bc70cc05e",
        gy: "693f46716eb6bc248876203756c9c7624bea73736ca3984087789c1e05a0c2d73ad3ff1ce67c39c4fdbd132c4ed7c8ad9808795bf230fa14",
        bits: 448,
    },
];

static CURVE_NAMES: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| STANDARD_CURVES.iter().map(|entry| entry.name).collect());

static REGISTRY: LazyLock<Result<Vec<Curve>>> =
    LazyLock::new(|| STANDARD_CURVES.iter().map(NamedCurve::build).collect());

fn parse_unsigned(hex: &str) -> Result<BigUint> {
    BigUint::parse_bytes(hex.as_bytes(), 16)
        .ok_or(Error::InvalidParameters("malformed embedded curve constant"))
}

fn parse_signed(hex: &str) -> Result<BigInt> {
    BigInt::parse_bytes(hex.as_bytes(), 16)
        .ok_or(Error::InvalidParameters("malformed embedded curve constant"))
}

impl NamedCurve {
    fn parameters(&self) -> Result<CurveParameters> {
        Ok(CurveParameters {
            form: self.form,
            p: parse_unsigned(self.p)?,
            coefficients: (parse_signed(self.c1)?, parse_signed(self.c2)?),
            order: parse_unsigned(self.n)?,
            cofactor: parse_unsigned(self.h)?,
            generator: (parse_unsigned(self.gx)?, parse_unsigned(self.gy)?),
            bits: self.bits,
        })
    }

    fn build(&self) -> Result<Curve> {
        Curve::build(&self.parameters()?, Some(self.name))
    }

    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// Names of all registry curves, in a stable order.
pub fn list_standard_curve_names() -> &'static [&'static str] {
    &CURVE_NAMES
}

pub(crate) fn lookup(name: &str) -> Result<Curve> {
    let index = STANDARD_CURVES
        .iter()
        .position(|entry| entry.matches(name))
        .ok_or_else(|| Error::UnknownCurve(name.to_string()))?;
    let curves = REGISTRY.as_ref().map_err(Clone::clone)?;
    Ok(curves[index].clone())
}
