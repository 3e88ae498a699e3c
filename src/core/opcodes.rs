// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Static mnemonic metadata for the CDP1802 family.
//!
//! The table covers the base CDP1802 instruction set, the CDP1806/1806A
//! extensions, and the assembler directives. It is presentation data only;
//! symbol resolution never consults it.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Processor variant an instruction first appeared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuVariant {
    Cdp1802,
    Cdp1806,
    Cdp1806A,
}

impl CpuVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CpuVariant::Cdp1802 => "CDP1802",
            CpuVariant::Cdp1806 => "CDP1806",
            CpuVariant::Cdp1806A => "CDP1806A",
        }
    }
}

/// One row of the mnemonic table: display name, variant tag, and the
/// register-transfer description shown in hover text.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub name: &'static str,
    pub cpu: CpuVariant,
    pub description: &'static str,
}

/// Look up a mnemonic (case-insensitive).
pub fn lookup(mnemonic: &str) -> Option<&'static OpcodeInfo> {
    table().get(mnemonic.to_ascii_lowercase().as_str())
}

/// Whether the word is a known instruction or directive mnemonic.
pub fn is_mnemonic(word: &str) -> bool {
    lookup(word).is_some()
}

fn table() -> &'static HashMap<&'static str, OpcodeInfo> {
    static TABLE: OnceLock<HashMap<&'static str, OpcodeInfo>> = OnceLock::new();
    TABLE.get_or_init(|| ENTRIES.iter().map(|(key, info)| (*key, *info)).collect())
}

use CpuVariant::{Cdp1802, Cdp1806, Cdp1806A};

macro_rules! op {
    ($key:literal, $name:literal, $cpu:ident, $desc:literal) => {
        (
            $key,
            OpcodeInfo {
                name: $name,
                cpu: $cpu,
                description: $desc,
            },
        )
    };
}

#[rustfmt::skip]
const ENTRIES: &[(&str, OpcodeInfo)] = &[
    op!("adc",  "Add with Carry", Cdp1802, "M(R(X))+D+DF -> DF, D"),
    op!("adci", "Add with Carry Immediate", Cdp1802, "M(R(P))+D+DF -> DF, D\nR(P)+1 -> R(P)"),
    op!("add",  "Add", Cdp1802, "M(R(X))+D -> DF, D"),
    op!("adi",  "Add Immediate", Cdp1802, "M(R(P))+D -> DF, D\nR(P)+1 -> R(P)"),
    op!("and",  "AND", Cdp1802, "M(R(X)) AND D -> D"),
    op!("ani",  "AND Immediate", Cdp1802, "M(R(P)) AND D -> D\nR(P)+1 -> R(P)"),
    op!("b1",   "Short Branch if EF1 = 1", Cdp1802, "If EF1=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("b2",   "Short Branch if EF2 = 1", Cdp1802, "If EF2=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("b3",   "Short Branch if EF3 = 1", Cdp1802, "If EF3=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("b4",   "Short Branch if EF4 = 1", Cdp1802, "If EF4=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bci",  "Short Branch on Counter Interrupt", Cdp1806, "If CI, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bdf",  "Short Branch if DF = 1", Cdp1802, "If DF=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bge",  "Short Branch if Greater or Equal", Cdp1802, "If DF=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bl",   "Short Branch if Less", Cdp1802, "If DF=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bm",   "Short Branch if Minus", Cdp1802, "If DF=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bn1",  "Short Branch if EF1 = 0", Cdp1802, "If EF1=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bn2",  "Short Branch if EF2 = 0", Cdp1802, "If EF2=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bn3",  "Short Branch if EF3 = 0", Cdp1802, "If EF3=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bn4",  "Short Branch if EF4 = 0", Cdp1802, "If EF4=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bnf",  "Short Branch if DF = 0", Cdp1802, "If DF=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bnq",  "Short Branch if Q = 0", Cdp1802, "If Q=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bnz",  "Short Branch if D NOT 0", Cdp1802, "If D NOT 0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bpz",  "Short Branch if Positive or Zero", Cdp1802, "If DF=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bq",   "Short Branch if Q = 1", Cdp1802, "If Q=1, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("br",   "Short Branch", Cdp1802, "M(R(P)) -> R(P).0"),
    op!("bxi",  "Short Branch on External Interrupt", Cdp1806, "If XI, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("bz",   "Short Branch if D = 0", Cdp1802, "If D=0, M(R(P)) -> R(P).0\nelse R(P)+1 -> R(P)"),
    op!("cid",  "Counter Interrupt Disable", Cdp1806, "0 -> CIE"),
    op!("cie",  "Counter Interrupt Enable", Cdp1806, "1 -> CIE"),
    op!("daci", "Decimal Add with Carry Immediate", Cdp1806A, "M(R(P))+D+DF -> DF, D\nR(P)+1 -> R(P)\nD Decimal Adjust -> DF, D"),
    op!("dadc", "Decimal Add with Carry", Cdp1806A, "M(R(X))+D+DF -> DF, D\nD Decimal Adjust -> DF, D"),
    op!("dadd", "Decimal Add", Cdp1806A, "M(R(X))+D -> DF, D\nD Decimal Adjust -> DF, D"),
    op!("dadi", "Decimal Add Immediate", Cdp1806A, "M(R(P))+D -> DF, D\nR(P)+1 -> R(P)\nD Decimal Adjust -> DF, D"),
    op!("dbnz", "Decrement Register N and Long Branch if not 0", Cdp1806A, "R(N)-1 -> R(N)\nIf R(N) not 0\nM(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse\nR(P)+2 -> R(P)"),
    op!("dec",  "Decrement Register N", Cdp1802, "R(N)-1 -> R(N)"),
    op!("dis",  "Disable", Cdp1802, "M(R(X)) -> X, P\nR(X)+1 -> R(X)\n0 -> MIE"),
    op!("dsav", "Save T, D, DF", Cdp1806, "R(X)-1 -> R(X)\nT -> M(R(X))\nR(X)-1 -> R(X)\nD -> M(R(X))\nR(X)-1 -> R(X)\nShift D Right with Carry\nD -> M(R(X))"),
    op!("dsbi", "Decimal Subtract Memory with Borrow Immediate", Cdp1806A, "D-M(R(P))-(NOT DF) -> DF, D\nR(P)+1 -> R(P)\nD Decimal Adjust -> DF, D"),
    op!("dsm",  "Decimal Subtract Memory", Cdp1802, "D-M(R(X)) -> DF, D\nD Decimal Adjust -> DF, D"),
    op!("dsmb", "Decimal Subtract Memory with Borrow", Cdp1806A, "D-M(R(X))-(NOT DF) -> DF, D\nD Decimal Adjust -> DF, D"),
    op!("dsmi", "Decimal Subtract Memory Immediate", Cdp1806A, "D-M(R(P)) -> DF, D\nR(P)+1 -> R(P)\nD Decimal Adjust -> DF, D"),
    op!("dtc",  "Decrement Timer/Counter", Cdp1802, "Counter - 1 -> Counter"),
    op!("etq",  "Enable Toggle Q", Cdp1806, "If Counter = 01\nNext Counter Clock Lo-Hi\n /Q -> Q"),
    op!("gec",  "Get Counter", Cdp1806, "Counter -> D"),
    op!("ghi",  "Get High Register N", Cdp1802, "R(N).1 -> D"),
    op!("glo",  "Get Low Register N", Cdp1802, "R(N).0 -> D"),
    op!("idl",  "Idle", Cdp1802, "Stop on TPB\nWait for DMA or Interrupt"),
    op!("inc",  "Increment Register N", Cdp1802, "R(N)+1 -> R(N)"),
    op!("inp",  "Input", Cdp1802, "BUS -> M(R(X))\nBUS -> D\nN -> N Lines"),
    op!("irx",  "Increment Register X", Cdp1802, "R(X)+1 -> R(X)"),
    op!("lbdf", "Long Branch if DF = 1", Cdp1802, "If DF=1, M(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse R(P)+2 -> R(P)"),
    op!("lbnf", "Long Branch if DF = 0", Cdp1802, "If DF=0, M(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse R(P)+2 -> R(P)"),
    op!("lbnq", "Long Branch if Q = 0", Cdp1802, "If Q=0, M(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse R(P)+2 -> R(P)"),
    op!("lbnz", "Long Branch if D NOT 0", Cdp1802, "If D NOT 0, M(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse R(P)+2 -> R(P)"),
    op!("lbq",  "Long Branch if Q = 1", Cdp1802, "If Q=1, M(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse R(P)+2 -> R(P)"),
    op!("lbr",  "Long Branch", Cdp1802, "M(R(P)) -> R(P).1\nM(R(P)+1) -> R(P).0"),
    op!("lbz",  "Long Branch if D = 0", Cdp1802, "If D=0, M(R(P)) -> R(P).1, M(R(P)+1) -> R(P).0\nelse R(P)+2 -> R(P)"),
    op!("lda",  "Load Advance", Cdp1802, "M(R(N)) -> D\nR(N)+1 -> R(N)"),
    op!("ldc",  "Load Counter", Cdp1806, "If Counter Stopped\nD -> CH, D -> Counter\nelse\nD -> CH"),
    op!("ldi",  "Load Immediate", Cdp1802, "M(R(P)) -> D\nR(P)+1 -> R(P)"),
    op!("ldn",  "Load via N", Cdp1802, "M(R(N)) -> D\nFor N not 0"),
    op!("ldx",  "Load via X", Cdp1802, "M(R(X)) -> D"),
    op!("ldxa", "Load via X and Advance", Cdp1802, "M(R(X)) -> D\nR(X)+1 -> R(X)"),
    op!("lsdf", "Long Skip if DF = 1", Cdp1802, "if DF=1, R(P)+2 -> R(P)\nelse Continue"),
    op!("lsie", "Long Skip if MIE = 1", Cdp1802, "if MIE=1, R(P)+2 -> R(P)\nelse Continue"),
    op!("lskp", "Long Skip", Cdp1802, "R(P)+2 -> R(P)"),
    op!("lsnf", "Long Skip if DF = 0", Cdp1802, "if DF=0, R(P)+2 -> R(P)\nelse Continue"),
    op!("lsnq", "Long Skip if Q = 0", Cdp1802, "if Q=0, R(P)+2 -> R(P)\nelse Continue"),
    op!("lsnz", "Long Skip if D NOT 0", Cdp1802, "if D NOT 0, R(P)+2 -> R(P)\nelse Continue"),
    op!("lsq",  "Long Skip if Q = 1", Cdp1802, "if Q=1, R(P)+2 -> R(P)\nelse Continue"),
    op!("lsz",  "Long Skip if D = 0", Cdp1802, "if D = 0, R(P)+2 -> R(P)\nelse Continue"),
    op!("mark", "Push X, P to Stack", Cdp1802, "(X, P) -> T\n(X, P) -> M(R(2))\nP -> X\nR(2)-1 -> R(2)"),
    op!("nbr",  "No Short Branch", Cdp1802, "R(P)+1 -> R(P)"),
    op!("nlbr", "No Long Branch", Cdp1802, "R(P)+2 -> R(P)"),
    op!("nop",  "No Operation", Cdp1802, "Continue"),
    op!("or",   "OR", Cdp1802, "M(R(X)) OR D -> D"),
    op!("ori",  "OR Immediate", Cdp1802, "M(R(P)) OR D -> D\nR(P)+1 -> R(P)"),
    op!("out",  "Output", Cdp1802, "M(R(X)) -> BUS\nR(X)+1 -> R(X)\nN -> N Lines"),
    op!("phi",  "Put High Register N", Cdp1802, "D -> R(N).1"),
    op!("plo",  "Put Low Register N", Cdp1802, "D -> R(N).0"),
    op!("req",  "Reset Q", Cdp1802, "0 -> Q"),
    op!("ret",  "Return", Cdp1802, "M(R(X)) -> X, P\nR(X)+1 -> R(X)\n1 -> MIE"),
    op!("rldi", "Register Load Immediate", Cdp1806, "M(R(P)) -> R(N).1\nM(R(P)+1) -> R(N).0\nR(P)+2 -> R(P)"),
    op!("rlxa", "Register Load via X and Advance", Cdp1806, "M(R(X)) -> R(N).1\nM(R(X)+1) -> R(N).0\nR(X)+2 -> R(X)"),
    op!("rnx",  "Register N to Register X Copy", Cdp1806, "R(N) -> R(X)"),
    op!("rshl", "Ring Shift Left", Cdp1802, "Shift D Left\nMSB(D) -> DF\nDF -> LSB(D)"),
    op!("rshr", "Ring Shift Right", Cdp1802, "Shift D Right\nLSB(D) -> DF\nDF -> MSB(D)"),
    op!("rsxd", "Register Store via X and Decrement", Cdp1806, "R(N).0 -> M(R(X))\nR(N).1 -> M(R(X)-1)\nR(X)-2 -> R(X)"),
    op!("sav",  "Save", Cdp1802, "T -> M(R(X))"),
    op!("scal", "Standard Call", Cdp1806, "R(N).0 -> M(R(X))\nR(N).1 -> M(R(X)-1)\nR(X)-2 -> R(X)\nR(P) -> R(N)\nThen\nM(R(N)) -> R(P).1\nM(R(N)+1) -> R(P).0\nR(N)+2 -> R(N)"),
    op!("scm1", "Set Counter Mode 1 and Start", Cdp1806, "/EF1 -> Counter Clock"),
    op!("scm2", "Set Counter Mode 2 and Start", Cdp1806, "/EF2 -> Counter Clock"),
    op!("sd",   "Subtract D", Cdp1802, "M(R(X))-D -> DF, D"),
    op!("sdb",  "Subtract D with Borrow", Cdp1802, "M(R(X))-D-(NOT DF) -> DF, D"),
    op!("sdbi", "Subtract D with Borrow Immediate", Cdp1802, "M(R(P))-D-(NOT DF) -> DF, D\nR(P)+1 -> R(P)"),
    op!("sdi",  "Subtract D Immediate", Cdp1802, "M(R(P))-D -> DF, D\nR(P)+1 -> R(P)"),
    op!("sep",  "Set P", Cdp1802, "N -> P"),
    op!("seq",  "Set Q", Cdp1802, "1 -> Q"),
    op!("sex",  "Set X", Cdp1802, "N -> X"),
    op!("shl",  "Shift Left", Cdp1802, "Shift D Left\nMSB(D) -> DF\n0 -> LSB(D)"),
    op!("shlc", "Shift Left with Carry", Cdp1802, "Shift D Left\nMSB(D) -> DF\nDF -> LSB(D)"),
    op!("shr",  "Shift Right", Cdp1802, "Shift D Right\nLSB(D) -> DF\n0 -> MSB(D)"),
    op!("shrc", "Shift Right with Carry", Cdp1802, "Shift D Right\nLSB(D) -> DF\nDF -> MSB(D)"),
    op!("skp",  "Short Skip", Cdp1802, "R(P)+1 -> R(P)"),
    op!("sm",   "Subtract Memory", Cdp1802, "D-M(R(X)) -> DF, D"),
    op!("smb",  "Subtract Memory with Borrow", Cdp1802, "D-M(R(X))-(NOT DF) -> DF, D"),
    op!("smbi", "Subtract Memory with Borrow Immediate", Cdp1802, "D-M(R(P))-(NOT DF) -> DF, D\nR(P)+1 -> R(P)"),
    op!("smi",  "Subtract Memory Immediate", Cdp1802, "D-M(R(P)) -> DF, D\nR(P)+1 -> R(P)"),
    op!("spm1", "Set Pulse Width Mode 1 and Start", Cdp1806, "TPA./EF1 -> Counter Clock\nEF1 Lo-Hi Stops Clock"),
    op!("spm2", "Set Pulse Width Mode 2 and Start", Cdp1806, "TPA./EF2 -> Counter Clock\nEF2 Lo-Hi Stops Clock"),
    op!("sret", "Standard Return", Cdp1806, "R(N) -> R(P)\nM(R(X)+1) -> R(N).1\nM(R(X)+2) -> R(N).0\nR(X)+2 -> R(X)"),
    op!("stm",  "Set Timer Mode and Start", Cdp1806, "TPA / 32 -> Counter Clock"),
    op!("stpc", "Stop Counter", Cdp1806, "Stop Counter Clock\n0 -> /32 Prescaler"),
    op!("str",  "Store via N", Cdp1802, "D -> M(R(N))"),
    op!("stxd", "Store via X and Decrement", Cdp1802, "D -> M(R(X))\nR(X)-1 -> R(X)"),
    op!("xid",  "External Interrupt Disable", Cdp1806, "0 -> XIE"),
    op!("xie",  "External Interrupt Enable", Cdp1806, "1 -> XIE"),
    op!("xor",  "Exclusive OR", Cdp1802, "M(R(X)) XOR D -> D"),
    op!("xri",  "Exclusive OR Immediate", Cdp1802, "M(R(P)) XOR D -> D\nR(P)+1 -> R(P)"),

    // Assembler directives share the table so hover covers them too.
    op!("db", "DB value,...,value", Cdp1802, "Inserts a sequence of comma separated bytes into the code stream. Parameters can either evaluate to single bytes, or be parsed as a double quoted string.\n\ne.g. DB 1,2,\"Hello World\""),
    op!("dw", "DW value,...,value", Cdp1802, "Inserts a sequence of comma separated words into the code stream. Each parameter is treated as a 16 bit number stored in big-endian format"),
    op!("dl", "DL value,...,value", Cdp1802, "Inserts a sequence of comma separated long words into the code stream. Each parameter is treated as a 32 bit number stored in big-endian format"),
    op!("dq", "DQ value,...,value", Cdp1802, "Inserts a sequence of comma separated quad words into the code stream. Each parameter is treated as a 64 bit number stored in big-endian format"),
    op!("rb", "RB count", Cdp1802, "Reserve count bytes of memory. No code is written to the code stream, but the Program Counter is incremented accordingly"),
    op!("rw", "RW count", Cdp1802, "Reserve count words (2 bytes) of memory. No code is written to the code stream, but the Program Counter is incremented accordingly"),
    op!("rl", "RL count", Cdp1802, "Reserve count longs (4 bytes) of memory. No code is written to the code stream, but the Program Counter is incremented accordingly"),
    op!("rq", "RQ count", Cdp1802, "Reserve count quadwords (8 bytes) of memory. No code is written to the code stream, but the Program Counter is incremented accordingly"),
    op!("assert", "ASSERT expression", Cdp1802, "Throws an error if the given expression evaluates to false"),
    op!("align", "ALIGN expression {,PAD=byte}", Cdp1802, "Increment the current address to the next 'expression' byte boundary.\nExpression must evaluate to a power of 2.\nOptionally pad skipped bytes with the 'byte' value given"),
    op!("macro", "Label MACRO {parameters}", Cdp1802, "Define a Macro. A label must be supplied, which names the macro. Any parameters listed can be used as tokens within the definition"),
    op!("endm", "End Macro", Cdp1802, "Marks the end of a Macro definition"),
    op!("endmacro", "End Macro", Cdp1802, "Marks the end of a Macro definition"),
    op!("subroutine", "Label SUBROUTINE {ALIGN=n|AUTO}, {PAD=padbyte}, {STATIC}", Cdp1802, "Define a Subroutine. A label must be supplied, which names the Subroutine. The following optional parameters can be supplied:\n\nALIGN=<number>|AUTO\n: Align the subroutine to the given byte boundary, or Auto-Align to the nearest enclosing power of 2 sized block\n\nPAD=<padbyte>: When align is specified, fill missing bytes with padbyte.\n\nSTATIC\n: Prevents the optimiser skipping assembly of the subroutine if it is not referenced elsewhere in the code."),
    op!("sub", "Label SUBROUTINE {ALIGN=n|AUTO}, {STATIC}", Cdp1802, "Define a Subroutine. A label must be supplied, which names the Subroutine. The following optional parameters can be supplied:\n\nALIGN=<number>|AUTO\n: Align the subroutine to the given byte boundary, or Auto-Align to the nearest enclosing power of 2 sized block\n\nPAD=<padbyte>: When align is specified, fill missing bytes with padbyte.\n\nSTATIC\n: Prevents the optimiser skipping assembly of the subroutine if it is not referenced elsewhere in the code."),
    op!("endsub", "ENDSUB {EntryPoint}", Cdp1802, "Ends a Subroutine definition. ENDSUB can be followed by an optional Label, which sets the entry point for the subroutine."),
    op!("end", "End of Source Code", Cdp1802, "Marks the end of the source code. No further lines are assembled. The optional parameter should evaluate to an address which is used as the entry point if the binary output format supports it."),
    op!("org", "ORG {address}", Cdp1802, "Set the current output address to the given expression"),
    op!("rorg", "RORG {address}", Cdp1802, "Relocate output. Calculate difference between current program counter and given address, and apply as an offset to binary output address for all subsequent code."),
    op!("rend", "REND", Cdp1802, "End Relocated code. (Equivalent to 'RORG .')"),
    op!("equ", "Set Label", Cdp1802, "Assign the value of the given expression to the supplied Label"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("LDI").unwrap().name, "Load Immediate");
        assert_eq!(lookup("ldi").unwrap().name, "Load Immediate");
        assert!(lookup("frobnicate").is_none());
    }

    #[test]
    fn variant_tags() {
        assert_eq!(lookup("nop").unwrap().cpu, CpuVariant::Cdp1802);
        assert_eq!(lookup("rldi").unwrap().cpu, CpuVariant::Cdp1806);
        assert_eq!(lookup("dadd").unwrap().cpu, CpuVariant::Cdp1806A);
        assert_eq!(CpuVariant::Cdp1806A.as_str(), "CDP1806A");
    }

    #[test]
    fn directives_are_covered() {
        assert!(is_mnemonic("equ"));
        assert!(is_mnemonic("SUBROUTINE"));
        assert!(is_mnemonic("endm"));
        assert!(is_mnemonic("org"));
    }
}
