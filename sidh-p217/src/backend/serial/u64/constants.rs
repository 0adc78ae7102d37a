// -*- mode: rust; -*-
//
// This file is part of sidh-p217.
// See LICENSE for licensing information.

//! Limb tables for the 64-bit serial backend.
//!
//! All multi-word values are little-digit-first: index 0 holds the least
//! significant 64 bits.  Montgomery-domain values use \\(R = 2^{256}\\).

/// The field characteristic \\(p = 2^{110} \cdot 3^{67} - 1\\).
pub(crate) const P217: [u64; 4] = [
    0xFFFF_FFFF_FFFF_FFFF,
    0x7BC6_BFFF_FFFF_FFFF,
    0xA108_7212_8AF4_3417,
    0x0000_0000_0124_8A1B,
];

/// \\(2p\\), the upper bound (exclusive) for unreduced field elements.
pub(crate) const P217X2: [u64; 4] = [
    0xFFFF_FFFF_FFFF_FFFE,
    0xF78D_7FFF_FFFF_FFFF,
    0x4210_E425_15E8_682E,
    0x0000_0000_0249_1437,
];

/// \\(4p\\), used for the lazy-reduced extension-field subtraction.
pub(crate) const P217X4: [u64; 4] = [
    0xFFFF_FFFF_FFFF_FFFC,
    0xEF1A_FFFF_FFFF_FFFF,
    0x8421_C84A_2BD0_D05D,
    0x0000_0000_0492_286E,
];

/// \\(p + 1 = 2^{110} \cdot 3^{67}\\).  The lowest word is zero, which is
/// what lets the Montgomery reduction skip the quotient multiplication.
pub(crate) const P217P1: [u64; 4] = [
    0x0000_0000_0000_0000,
    0x7BC6_C000_0000_0000,
    0xA108_7212_8AF4_3417,
    0x0000_0000_0124_8A1B,
];

/// \\(R^2 \bmod p\\), the to-Montgomery conversion factor.
pub(crate) const MONTGOMERY_R2: [u64; 4] = [
    0x2A73_2D23_6E62_C233,
    0x9B7E_8A53_EDA2_096F,
    0xB06C_6BF6_EE0B_9770,
    0x0000_0000_002E_D0F8,
];

/// \\(R \bmod p\\), the value one in Montgomery representation.
pub(crate) const MONTGOMERY_ONE: [u64; 4] = [
    0x0000_00E0_0643_0584,
    0x0BC5_0000_0000_0000,
    0xEDA1_260B_181C_A0F5,
    0x0000_0000_0011_177F,
];

/// \\((p - 3)/4\\), the exponent of the shared inversion chain.
/// 215 bits; the two upper squarings and final multiply that complete
/// \\(a^{p-2}\\) live in `field.rs`.
pub(crate) const PM3D4: [u64; 4] = [
    0xFFFF_FFFF_FFFF_FFFF,
    0xDEF1_AFFF_FFFF_FFFF,
    0xE842_1C84_A2BD_0D05,
    0x0000_0000_0049_2286,
];

/// x-coordinates of the 2^110-torsion basis {P_A, Q_A, P_A - Q_A} over
/// GF(p^2), in Montgomery representation.  Layout: XPA0, XPA1, XQA0,
/// XQA1, XRA0, XRA1.
pub(crate) const ALICE_BASIS: [[u64; 4]; 6] = [
    [
        0x3A02_003A_41AA_5696,
        0xC45F_FA33_7155_93D5,
        0x1A7C_6C47_5E2B_2E0C,
        0x0000_0000_00DE_6060,
    ],
    [
        0x8958_C2BA_9008_3658,
        0xEC55_A133_854B_0C3E,
        0x33B6_03EB_1415_D88D,
        0x0000_0000_007B_F805,
    ],
    [
        0x787B_BD78_8682_88C6,
        0x012C_095E_06EA_C0F0,
        0x9BA4_2247_4C68_3ED8,
        0x0000_0000_00DE_59E6,
    ],
    [
        0x6A98_D378_23E8_9645,
        0xEEDA_FB39_BBE9_6580,
        0x0CE1_6ADF_45A3_F745,
        0x0000_0000_001A_56C5,
    ],
    [
        0xA4B7_B48E_0924_477C,
        0x1585_3704_165F_A336,
        0x3ED6_AEB5_32AA_92D5,
        0x0000_0000_010A_3644,
    ],
    [
        0x508D_0E83_E36F_5BA7,
        0x2507_6F50_184D_504D,
        0x4852_6CE8_FBAD_A279,
        0x0000_0000_00D5_0F83,
    ],
];

/// x-coordinates of the 3^67-torsion basis {P_B, Q_B, P_B - Q_B} over
/// GF(p^2), in Montgomery representation.  P_B and Q_B have zero
/// imaginary parts.  Layout: XPB0, XPB1, XQB0, XQB1, XRB0, XRB1.
pub(crate) const BOB_BASIS: [[u64; 4]; 6] = [
    [
        0xF16B_8FCD_5094_FF73,
        0xD729_4595_0DEA_5A40,
        0x5B80_51E3_F357_32C7,
        0x0000_0000_0101_4718,
    ],
    [0, 0, 0, 0],
    [
        0x12D7_7EE8_66B1_2444,
        0x186B_F790_3423_F87C,
        0xDC06_1C02_B9F7_02FF,
        0x0000_0000_0049_1891,
    ],
    [0, 0, 0, 0],
    [
        0xFF19_58F6_3BDB_176A,
        0xBCE0_1B07_886D_B10A,
        0x1365_6F1F_8F35_E7B4,
        0x0000_0000_00EC_1A63,
    ],
    [
        0x3EF5_FA0B_A1CF_4046,
        0x3857_56FF_BBC0_F78C,
        0xA601_6279_207B_76B5,
        0x0000_0000_004C_172A,
    ],
];
