use protobuf_codegen::Customize;

fn main() {
    // Generate the registry OpList message types
    protobuf_codegen::Codegen::new()
        .pure()
        .includes(["protos"])
        .input("protos/registry.proto")
        .cargo_out_dir("registry-protos")
        .customize(Customize::default().gen_mod_rs(true))
        .run_from_script();
}
