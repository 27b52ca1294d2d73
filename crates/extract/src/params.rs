use parser::DocBlock;

use crate::Argument;

/// Attach `@param` tags to arguments that are plain variables with the same name.
///
/// The first tag declaring a name wins. Arguments such as `$args['key']` or `$this->id` are
/// never matched.
pub fn bind_params(arguments: &mut [Argument], doc_block: &DocBlock) {
  for argument in arguments {
    let Some(name) = argument.variable.as_deref() else {
      continue;
    };
    argument.param = doc_block.params().find(|p| p.variable_name() == name).cloned();
  }
}
