mod pikevm;
