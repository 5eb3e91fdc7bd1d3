//! Signatures of all functions defined in the standard runtime
//! environment. They have no MAVL-level bodies; calls to them resolve
//! through the module environment like any other call.

use crate::types::{NumericType, Type};
use crate::SourceLocation;

use super::environment::{FunctionSignature, ModuleEnvironment};

fn builtin(env: &mut ModuleEnvironment, name: &str, parameters: &[Type], return_type: Type) {
    let signature = FunctionSignature {
        name: name.to_string(),
        parameter_types: parameters.to_vec(),
        return_type,
        location: SourceLocation::UNKNOWN,
    };
    // The builtin table is fixed and has no duplicates
    if env.declare_function(signature).is_err() {
        unreachable!("duplicate builtin function {name}");
    }
}

pub fn register_builtins(env: &mut ModuleEnvironment) {
    let image = Type::matrix(NumericType::Int, 512, 512);
    let int_mat = |n| Type::matrix(NumericType::Int, n, n);
    let float_mat = |n| Type::matrix(NumericType::Float, n, n);

    // Image I/O
    builtin(env, "readImage", &[Type::String], image.clone());
    builtin(env, "writeImage", &[Type::String, image], Type::Void);

    // Integer matrix I/O
    builtin(env, "readIntMatrix64", &[Type::String], int_mat(64));
    builtin(env, "readIntMatrix16", &[Type::String], int_mat(16));
    builtin(env, "readIntMatrix9", &[Type::String], int_mat(9));
    builtin(env, "writeIntMatrix64", &[Type::String, int_mat(64)], Type::Void);
    builtin(env, "writeIntMatrix16", &[Type::String, int_mat(16)], Type::Void);
    builtin(env, "writeIntMatrix9", &[Type::String, int_mat(9)], Type::Void);

    // Floating point matrix I/O
    builtin(env, "readFloatMatrix64", &[Type::String], float_mat(64));
    builtin(env, "readFloatMatrix16", &[Type::String], float_mat(16));
    builtin(env, "readFloatMatrix9", &[Type::String], float_mat(9));
    builtin(env, "writeFloatMatrix64", &[Type::String, float_mat(64)], Type::Void);
    builtin(env, "writeFloatMatrix16", &[Type::String, float_mat(16)], Type::Void);
    builtin(env, "writeFloatMatrix9", &[Type::String, float_mat(9)], Type::Void);

    // Math
    builtin(env, "powInt", &[Type::Int, Type::Int], Type::Int);
    builtin(env, "powFloat", &[Type::Float, Type::Float], Type::Float);
    builtin(env, "sqrtInt", &[Type::Int], Type::Int);
    builtin(env, "sqrtFloat", &[Type::Float], Type::Float);
    builtin(env, "modulo", &[Type::Int, Type::Int], Type::Int);

    // Console I/O
    builtin(env, "printInt", &[Type::Int], Type::Void);
    builtin(env, "printFloat", &[Type::Float], Type::Void);
    builtin(env, "printBool", &[Type::Bool], Type::Void);
    builtin(env, "printString", &[Type::String], Type::Void);
    builtin(env, "printLine", &[], Type::Void);
    builtin(env, "readInt", &[], Type::Int);
    builtin(env, "readFloat", &[], Type::Float);
    builtin(env, "readBool", &[], Type::Bool);

    // Type conversions
    builtin(env, "float2int", &[Type::Float], Type::Int);
    builtin(env, "int2float", &[Type::Int], Type::Float);

    // Other
    builtin(env, "error", &[Type::String], Type::Float);
}
