use arch::token::{tokenize, Tokens};

fn case(raw: &str, mnemonic: &str, arg1: &str, arg2: &str) {
    let tokens = tokenize(raw);
    println!("{:?} -> {:?}", raw, tokens);
    assert_eq!(
        tokens,
        Tokens {
            mnemonic: mnemonic.to_string(),
            arg1: arg1.to_string(),
            arg2: arg2.to_string(),
        }
    );
}

#[test]
fn tests() {
    case("LD A,N", "LD", "A", "N");
    case("LD a,N", "LD", "a", "N");
    case("  ADD hl , bc  ", "ADD", "hl", "bc");
    case("EX af,af'", "EX", "af", "af'");
    case("OUT (c),a", "OUT", "(c)", "a");
    case("RST 56", "RST", "56", "");
    case("LD (NN),a", "LD", "(NN)", "a");
    case("NOP", "NOP", "", "");
    case("", "", "", "");
    case("LD,a", "LD,a", "", "");
    case("LD a,b,c", "LD", "a", "b,c");
    case("LD a,   b", "LD", "a", "b");
    case("LD  a", "LD", "a", "");
    case("JP\t(hl)", "JP\t(hl)", "", "");
}

#[test]
fn total_over_arbitrary_strings() {
    for raw in ["", " ", ",", " , ", ",,,", "a b", "é ü,ö", "\t", "X ,"] {
        let _ = tokenize(raw);
    }
}

#[test]
fn reconstruction_round_trips() {
    for raw in [
        "LD a,N",
        "ADD   hl,  bc",
        "NOP",
        "JP (hl)",
        "LD a,b,c",
        "IM 2",
        "X ,",
        "EX (sp),hl",
    ] {
        let tokens = tokenize(raw);
        let rebuilt = format!("{} {},{}", tokens.mnemonic, tokens.arg1, tokens.arg2);
        assert_eq!(tokenize(&rebuilt), tokens, "{raw:?} via {rebuilt:?}");
    }
}

#[test]
fn arg2_keeps_inner_text() {
    // arg2 is only left-trimmed; everything after the first comma is kept
    let tokens = tokenize("LD a, (ix + DIS)");
    assert_eq!(tokens.arg2, "(ix + DIS)");
}
