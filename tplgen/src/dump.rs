use arch::reader::Template;
use color_print::cformat;

use crate::error::Error;

pub fn print_dump(path: &str, template: &Template) {
    println!(
        "{}+------[{}]{}",
        "-".repeat(9),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );
    println!(
        "{:9}| version {}, {} instructions",
        "", template.header.version, template.header.count
    );
    for (idx, inst) in template.instructions.iter().enumerate() {
        let header = cformat!(
            "<g>{}</> flags={:02X} combos={}",
            inst.mnemonic(),
            inst.flags(),
            inst.combos().len()
        );
        println!("{:9}| {:>4}: {}", "", idx + 1, header);
        for combo in inst.combos() {
            println!("{:9}|       {}", "", combo.cformat(inst.mnemonic()));
        }
    }
    println!("---------+-----------------------------------------------------");
}

pub fn to_yaml(template: &Template) -> Result<String, Error> {
    serde_yaml::to_string(template).map_err(|e| Error::Yaml("<template>".to_string(), e))
}
