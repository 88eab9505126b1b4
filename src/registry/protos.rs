// Message types generated by build.rs from protos/registry.proto.
include!(concat!(env!("OUT_DIR"), "/registry-protos/mod.rs"));
