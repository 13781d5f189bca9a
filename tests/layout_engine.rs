// Sat Feb 14 2026 - Alex

use anyhow::Result;
use native_layout_engine::{
    abi, generator::registry, BufferUtils, ClCodeGenerator, ComplexStructure, ComplexUnion,
    DescriptionLanguage, LayoutProvider, MemberDecl, PrimitiveType, ScalarStructure,
    StructCodeGenerator, Structure, StructureError, StructureSettings,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

struct Provider {
    name: &'static str,
    settings: StructureSettings,
    members: Vec<MemberDecl>,
}

impl LayoutProvider for Provider {
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn settings(&self) -> StructureSettings {
        self.settings
    }

    fn members(&self) -> Vec<MemberDecl> {
        self.members.clone()
    }
}

fn register(name: &'static str, settings: StructureSettings, members: Vec<MemberDecl>) {
    registry::global().register(Arc::new(Provider {
        name,
        settings,
        members,
    }));
}

// Shared fixture types, registered exactly once per test binary.
static FIXTURES: Lazy<()> = Lazy::new(|| {
    register(
        "Particle",
        StructureSettings::REQUIRES_COMPUTATION,
        vec![
            MemberDecl::primitive("kind", PrimitiveType::I32),
            MemberDecl::primitive("mass", PrimitiveType::F64),
            MemberDecl::primitive("charge", PrimitiveType::F32),
        ],
    );
    register(
        "Emitter",
        StructureSettings::REQUIRES_COMPUTATION | StructureSettings::CUSTOM_LENGTH,
        vec![
            MemberDecl::primitive("count", PrimitiveType::U32),
            MemberDecl::struct_array("particles", "Particle").with_length(4),
        ],
    );
    register(
        "Register",
        StructureSettings::REQUIRES_COMPUTATION | StructureSettings::UNION,
        vec![
            MemberDecl::primitive("word", PrimitiveType::U64),
            MemberDecl::primitive("float_view", PrimitiveType::F32),
        ],
    );
    register(
        "Locked",
        StructureSettings::REQUIRES_COMPUTATION | StructureSettings::FORBID_ABI_OVERRIDE,
        vec![MemberDecl::primitive("value", PrimitiveType::I64)],
    );
});

fn fixtures() {
    Lazy::force(&FIXTURES);
}

#[test]
fn particle_layout_follows_natural_alignment() -> Result<()> {
    fixtures();
    let info = registry::global()
        .generator_for("Particle")?
        .calculate_info(abi::default_abi().as_ref(), None)?;
    let complex = info.as_complex().expect("struct layout");
    // i32 at 0, f64 at 8 after 4 bytes of padding, f32 at 16, 4 trailing
    assert_eq!(complex.offset_of(0), 0);
    assert_eq!(complex.offset_of(1), 8);
    assert_eq!(complex.offset_of(2), 16);
    assert_eq!(info.required_size(), 24);
    assert_eq!(info.alignment().as_usize(), 8);
    assert_eq!(complex.sizes().iter().sum::<usize>(), info.required_size());
    Ok(())
}

#[test]
fn layout_cache_is_identity_stable() -> Result<()> {
    fixtures();
    let generator = registry::global().generator_for("Particle")?;
    let abi = abi::default_abi();
    let first = generator.calculate_info(abi.as_ref(), None)?;
    let second = generator.calculate_info(abi.as_ref(), None)?;
    assert!(Arc::ptr_eq(&first, &second));
    Ok(())
}

#[test]
fn round_trip_through_children_and_raw_bytes() -> Result<()> {
    fixtures();
    let mut particle = ComplexStructure::of_default("Particle")?;
    particle.allocate()?;
    particle.scalar_mut("kind")?.set_i32(7)?;
    particle.scalar_mut("mass")?.set_f64(2.25)?;
    particle.scalar_mut("charge")?.set_f32(-1.0)?;

    assert_eq!(particle.scalar("kind")?.get_i32()?, 7);
    assert_eq!(particle.scalar("mass")?.get_f64()?, 2.25);
    assert_eq!(particle.scalar("charge")?.get_f32()?, -1.0);

    // the same values must be visible at the computed raw offsets
    let mut word = [0u8; 8];
    particle.read_bytes(0, &mut word[..4])?;
    assert_eq!(i32::from_ne_bytes([word[0], word[1], word[2], word[3]]), 7);
    particle.read_bytes(8, &mut word)?;
    assert_eq!(f64::from_ne_bytes(word), 2.25);
    particle.read_bytes(16, &mut word[..4])?;
    assert_eq!(
        f32::from_ne_bytes([word[0], word[1], word[2], word[3]]),
        -1.0
    );
    Ok(())
}

#[test]
fn modification_propagates_to_the_root_only() -> Result<()> {
    fixtures();
    let mut emitter = ComplexStructure::of_default("Emitter")?;
    emitter.allocate()?;
    assert!(!emitter.is_modified());

    let particles = emitter
        .item_mut(1)
        .expect("particles slot")
        .as_any_mut()
        .downcast_mut::<native_layout_engine::StructureArray>()
        .expect("structure array");
    let particle = particles.get(2)?;
    let complex = particle
        .as_any_mut()
        .downcast_mut::<ComplexStructure>()
        .expect("complex element");
    complex.scalar_mut("mass")?.set_f64(5.0)?;

    assert!(emitter.is_modified());
    emitter.clear_modified();
    assert!(!emitter.is_modified());
    Ok(())
}

#[test]
fn union_members_alias_the_same_bytes() -> Result<()> {
    fixtures();
    let mut register = ComplexUnion::of_default("Register")?;
    register.allocate()?;
    register.scalar_mut("float_view")?.set_f32(1.0)?;
    // both members start at offset 0, so the float's bytes lead the word
    let mut head = [0u8; 4];
    register.read_bytes(0, &mut head)?;
    assert_eq!(head, 1.0f32.to_ne_bytes());
    assert_eq!(register.info()?.required_size(), 8);
    Ok(())
}

#[test]
fn union_of_mixed_size_members_rounds_to_largest() -> Result<()> {
    fixtures();
    register(
        "Vec3",
        StructureSettings::REQUIRES_COMPUTATION,
        vec![
            MemberDecl::primitive("x", PrimitiveType::F32),
            MemberDecl::primitive("y", PrimitiveType::F32),
            MemberDecl::primitive("z", PrimitiveType::F32),
        ],
    );
    register(
        "ScalarOrVec",
        StructureSettings::REQUIRES_COMPUTATION | StructureSettings::UNION,
        vec![
            MemberDecl::primitive("scalar", PrimitiveType::F32),
            MemberDecl::named("vector", "Vec3"),
        ],
    );
    let info = registry::global()
        .generator_for("ScalarOrVec")?
        .calculate_info(abi::default_abi().as_ref(), None)?;
    // 4-byte and 12-byte members both at offset 0; aggregate takes the
    // larger size and the 12-byte member's alignment
    let union_info = info.as_union().expect("union layout");
    assert_eq!(union_info.positions(), &[0, 0]);
    assert_eq!(info.required_size(), 12);
    assert_eq!(info.alignment().as_usize(), 4);
    Ok(())
}

#[test]
fn union_with_shares_buffer_and_modified_flag() -> Result<()> {
    fixtures();
    let mut original = ComplexStructure::of_default("Particle")?;
    original.allocate()?;
    original.scalar_mut("kind")?.set_i32(42)?;
    original.clear_modified();

    let mut alias = ComplexStructure::of_default("Particle")?;
    alias.union_with(&original)?;
    assert_eq!(alias.scalar("kind")?.get_i32()?, 42);

    alias.scalar_mut("kind")?.set_i32(13)?;
    assert_eq!(original.scalar("kind")?.get_i32()?, 13);
    assert!(original.is_modified());
    Ok(())
}

#[test]
fn claim_buffer_adopts_without_copy() -> Result<()> {
    fixtures();
    let info = registry::global()
        .generator_for("Particle")?
        .calculate_info(abi::default_abi().as_ref(), None)?;
    let mut buffer = BufferUtils::create_aligned(info.required_size(), 8)?;
    buffer.write(0, &99i32.to_ne_bytes())?;

    let mut particle = ComplexStructure::of_default("Particle")?;
    particle.claim_buffer(buffer)?;
    assert_eq!(particle.scalar("kind")?.get_i32()?, 99);
    Ok(())
}

#[test]
fn allocate_twice_is_a_state_error() -> Result<()> {
    fixtures();
    let mut particle = ComplexStructure::of_default("Particle")?;
    particle.allocate()?;
    assert!(matches!(
        particle.allocate(),
        Err(StructureError::AlreadyBound)
    ));
    Ok(())
}

#[test]
fn too_small_buffer_is_rejected() -> Result<()> {
    fixtures();
    let mut particle = ComplexStructure::of_default("Particle")?;
    let buffer = BufferUtils::create_64bit_aligned(8)?;
    assert!(matches!(
        particle.claim_buffer(buffer),
        Err(StructureError::BufferTooSmall { .. })
    ));
    Ok(())
}

#[test]
fn forced_abi_override_on_forbidding_child_fails() {
    fixtures();
    register(
        "LockedHolder",
        StructureSettings::REQUIRES_COMPUTATION,
        vec![MemberDecl::named("inner", "Locked")],
    );
    let abi = abi::default_abi();
    let err = registry::global()
        .generator_for("LockedHolder")
        .unwrap()
        .calculate_info(abi.as_ref(), Some(abi.as_ref()))
        .unwrap_err();
    assert!(matches!(
        err,
        StructureError::AbiOverrideForbidden { class } if class == "Locked"
    ));
}

#[test]
fn nested_struct_code_is_regenerated_with_padding() -> Result<()> {
    fixtures();
    let generator = registry::global().generator_for("Emitter")?;
    let info = generator.calculate_info(abi::default_abi().as_ref(), None)?;
    let code = ClCodeGenerator::new().generate_struct_code(
        DescriptionLanguage::OpenCl,
        "Emitter",
        &info,
    )?;

    // the nested element type is declared first, padding is explicit
    let particle_at = code.find("} Particle;").expect("nested declaration");
    let emitter_at = code.find("} Emitter;").expect("outer declaration");
    assert!(particle_at < emitter_at);
    assert!(code.contains("uchar _pad0[4];"));
    assert!(code.contains("Particle particles[4];"));
    assert!(code.contains("uint count;"));
    Ok(())
}

#[test]
fn layout_description_serializes_to_json() -> Result<()> {
    fixtures();
    let description = registry::global()
        .generator_for("Particle")?
        .describe(abi::default_abi().as_ref())?;
    let json = description.to_json()?;
    assert!(json.contains("\"name\": \"Particle\""));
    assert!(json.contains("\"mass\""));
    assert_eq!(description.size, 24);
    Ok(())
}

#[test]
fn scalar_accessors_fail_before_binding() {
    let scalar = ScalarStructure::new(PrimitiveType::F32);
    assert!(matches!(scalar.get_f32(), Err(StructureError::NotBound)));
}

#[test]
fn pointer_strategy_adopts_external_memory() -> Result<()> {
    fixtures();
    BufferUtils::set_pointer_to_buffer(|ptr, capacity| unsafe {
        native_layout_engine::ByteBuffer::from_raw(ptr, capacity)
    });
    let mut backing = vec![0u8; 24];
    let buffer = BufferUtils::pointer_to_buffer(backing.as_mut_ptr(), backing.len())?;
    assert!(!buffer.is_owned());
    assert_eq!(buffer.capacity(), 24);
    Ok(())
}
